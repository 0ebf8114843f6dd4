use super::check_parent_count;
use crate::nn::nodes::raw_node::{PassContext, TraitNode};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 求和节点：把父节点的所有元素加总为形状`[1]`的标量
///
/// backward: 每个元素的梯度都等于输出梯度
#[derive(Clone, Default)]
pub(in crate::nn) struct Sum;

impl TraitNode for Sum {
    fn type_name(&self) -> &'static str {
        "sum"
    }

    fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
        check_parent_count(self.type_name(), parent_shapes, 1)?;
        Ok(vec![1])
    }

    fn fprop(
        &mut self,
        parents: &[&Tensor],
        value: &mut Tensor,
        _ctx: &mut PassContext,
    ) -> Result<(), GraphError> {
        value.sum_from(parents[0]);
        Ok(())
    }

    fn bprop(
        &self,
        parents: &[&Tensor],
        _value: &Tensor,
        grad: &Tensor,
        _phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        let upstream = grad.number().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "Sum节点的输出梯度须为标量，但其形状为{:?}",
                grad.shape()
            ))
        })?;
        Ok(vec![Tensor::full(upstream, parents[0].shape())])
    }
}
