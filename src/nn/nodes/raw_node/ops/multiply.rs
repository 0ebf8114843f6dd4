use super::broadcast_setup;
use crate::nn::nodes::raw_node::{PassContext, TraitNode};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 逐元素乘法节点，支持 NumPy 风格广播
///
/// forward: z = a ⊙ b
/// backward: dL/da = sum_to_shape(dL/dz ⊙ b, a.shape)，dL/db = sum_to_shape(dL/dz ⊙ a, b.shape)
#[derive(Clone, Default)]
pub(in crate::nn) struct Multiply;

impl TraitNode for Multiply {
    fn type_name(&self) -> &'static str {
        "multiply"
    }

    fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
        broadcast_setup(self.type_name(), parent_shapes)
    }

    fn fprop(
        &mut self,
        parents: &[&Tensor],
        value: &mut Tensor,
        _ctx: &mut PassContext,
    ) -> Result<(), GraphError> {
        value.zip_from(parents[0], parents[1], |a, b| a * b);
        Ok(())
    }

    fn bprop(
        &self,
        parents: &[&Tensor],
        _value: &Tensor,
        grad: &Tensor,
        _phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        let (a, b) = (parents[0], parents[1]);
        Ok(vec![
            (grad * b).sum_to_shape(a.shape()),
            (grad * a).sum_to_shape(b.shape()),
        ])
    }
}
