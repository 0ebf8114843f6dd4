use super::{PassContext, TraitNode, check_parent_count};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 数据源节点：其值由外部在两次前向传播之间写入（`Graph::set_node_value`），
/// 前向传播时被跳过
#[derive(Clone)]
pub(in crate::nn) struct Source {
    shape: Vec<usize>,
}

impl Source {
    pub(in crate::nn) fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
        }
    }

    pub(in crate::nn) fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub(in crate::nn) fn set_shape(&mut self, shape: &[usize]) {
        self.shape = shape.to_vec();
    }
}

impl TraitNode for Source {
    fn type_name(&self) -> &'static str {
        "source"
    }

    fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
        check_parent_count(self.type_name(), parent_shapes, 0)?;
        Ok(self.shape.clone())
    }

    fn fprop(
        &mut self,
        _parents: &[&Tensor],
        _value: &mut Tensor,
        _ctx: &mut PassContext,
    ) -> Result<(), GraphError> {
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
