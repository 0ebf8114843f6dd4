use super::{pointwise_grad, unary_setup};
use crate::nn::nodes::raw_node::{PassContext, TraitNode};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// Sigmoid 激活函数节点
///
/// forward: sigmoid(x) = 1 / (1 + e^(-x))
/// backward: d(sigmoid)/dx = sigmoid(x) * (1 - sigmoid(x))
#[derive(Clone, Default)]
pub(in crate::nn) struct Sigmoid;

impl TraitNode for Sigmoid {
    fn type_name(&self) -> &'static str {
        "sigmoid"
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
        value.map_from(parents[0], |x| 1.0 / (1.0 + (-x).exp()));
        Ok(())
    }

    fn bprop(
        &self,
        _parents: &[&Tensor],
        value: &Tensor,
        grad: &Tensor,
        _phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        // 直接用前向传播的输出，不必重新计算 sigmoid
        Ok(vec![pointwise_grad(value, grad, |y, g| g * y * (1.0 - y))])
    }
}
