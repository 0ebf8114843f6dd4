use super::{PassContext, TraitNode, check_parent_count};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 常量节点：值在构建时给定，不参与训练
#[derive(Clone)]
pub(in crate::nn) struct Constant {
    value: Tensor,
}

impl Constant {
    pub(in crate::nn) fn new(value: &Tensor) -> Self {
        Self {
            value: value.clone(),
        }
    }
}

impl TraitNode for Constant {
    fn type_name(&self) -> &'static str {
        "constant"
    }

    fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
        check_parent_count(self.type_name(), parent_shapes, 0)?;
        Ok(self.value.shape().to_vec())
    }

    fn fprop(
        &mut self,
        _parents: &[&Tensor],
        value: &mut Tensor,
        _ctx: &mut PassContext,
    ) -> Result<(), GraphError> {
        value.assign(&self.value);
        Ok(())
    }

    fn bprop(
        &self,
        _parents: &[&Tensor],
        _value: &Tensor,
        _grad: &Tensor,
        _phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        Ok(Vec::new())
    }
}
