use super::unary_setup;
use crate::nn::nodes::raw_node::{PassContext, TraitNode};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 梯度反转节点
///
/// 前向传播时原样输出父节点的值，反向传播时把收到的梯度逐元素取负后传给父节点。
/// 对抗网络中用它把判别器的目标以相反的符号传给生成器，只需一次前向传播。
#[derive(Clone, Default)]
pub(in crate::nn) struct NegativeGradient;

impl TraitNode for NegativeGradient {
    fn type_name(&self) -> &'static str {
        "negative_gradient"
    }

    fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
        unary_setup(self.type_name(), parent_shapes)
    }

    fn fprop(
        &mut self,
        parents: &[&Tensor],
        value: &mut Tensor,
        _ctx: &mut PassContext,
    ) -> Result<(), GraphError> {
        value.assign(parents[0]);
        Ok(())
    }

    fn bprop(
        &self,
        _parents: &[&Tensor],
        _value: &Tensor,
        grad: &Tensor,
        _phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        Ok(vec![-grad])
    }
}
