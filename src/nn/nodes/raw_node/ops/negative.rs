use super::unary_setup;
use crate::nn::nodes::raw_node::{PassContext, TraitNode};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 取负节点
///
/// forward: y = -x
/// backward: dL/dx = -dL/dy
#[derive(Clone, Default)]
pub(in crate::nn) struct Negative;

impl TraitNode for Negative {
    fn type_name(&self) -> &'static str {
        "negative"
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
        value.map_from(parents[0], |x| -x);
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
