use super::{pointwise_grad, unary_setup};
use crate::nn::nodes::raw_node::{PassContext, TraitNode};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 自然对数节点
///
/// forward: y = ln(x)
/// backward: dL/dx = dL/dy / x
#[derive(Clone, Default)]
pub(in crate::nn) struct Log;

impl TraitNode for Log {
    fn type_name(&self) -> &'static str {
        "log"
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
        value.map_from(parents[0], f32::ln);
        Ok(())
    }

    fn bprop(
        &self,
        parents: &[&Tensor],
        _value: &Tensor,
        grad: &Tensor,
        _phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        Ok(vec![pointwise_grad(parents[0], grad, |x, g| g / x)])
    }
}
