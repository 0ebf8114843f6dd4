use super::{PassContext, TraitNode, check_parent_count};
use crate::nn::{GraphError, Parameter, Phase};
use crate::tensor::Tensor;

/// 参数节点：前向传播时读出共享参数的当前值。
/// 其梯度在反向传播结束后由图累加回共享参数
#[derive(Clone)]
pub(in crate::nn) struct ParameterNode {
    parameter: Parameter,
}

impl ParameterNode {
    pub(in crate::nn) fn new(parameter: &Parameter) -> Self {
        Self {
            parameter: parameter.clone(),
        }
    }

    pub(in crate::nn) const fn parameter(&self) -> &Parameter {
        &self.parameter
    }
}

impl TraitNode for ParameterNode {
    fn type_name(&self) -> &'static str {
        "parameter"
    }

    fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
        check_parent_count(self.type_name(), parent_shapes, 0)?;
        Ok(self.parameter.shape())
    }

    fn fprop(
        &mut self,
        _parents: &[&Tensor],
        value: &mut Tensor,
        _ctx: &mut PassContext,
    ) -> Result<(), GraphError> {
        value.assign(&self.parameter.value());
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
