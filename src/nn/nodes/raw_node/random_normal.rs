use super::{PassContext, TraitNode, check_parent_count};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 随机噪声节点：每次前向传播都从 N(mean, std²) 中重新采样
#[derive(Clone)]
pub(in crate::nn) struct RandomNormal {
    shape: Vec<usize>,
    mean: f32,
    std_dev: f32,
}

impl RandomNormal {
    pub(in crate::nn) fn new(shape: &[usize], mean: f32, std_dev: f32) -> Result<Self, GraphError> {
        if !(std_dev >= 0.0 && std_dev.is_finite()) {
            return Err(GraphError::InvalidConfig(format!(
                "正态分布的标准差须为非负有限值，但得到{std_dev}"
            )));
        }
        Ok(Self {
            shape: shape.to_vec(),
            mean,
            std_dev,
        })
    }
}

impl TraitNode for RandomNormal {
    fn type_name(&self) -> &'static str {
        "random_normal"
    }

    fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
        check_parent_count(self.type_name(), parent_shapes, 0)?;
        Ok(self.shape.clone())
    }

    fn fprop(
        &mut self,
        _parents: &[&Tensor],
        value: &mut Tensor,
        ctx: &mut PassContext,
    ) -> Result<(), GraphError> {
        value.sample_normal_(self.mean, self.std_dev, ctx.rng);
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
