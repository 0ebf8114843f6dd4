use super::{pointwise_grad, unary_setup};
use crate::nn::nodes::raw_node::{PassContext, TraitNode};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 截断节点
///
/// forward: y = clamp(x, min, max)
/// backward: 在 min <= x <= max 处梯度原样通过，区间外为 0
///
/// 放在`Log`之前可以保证对数的参数远离 0，输出与梯度都是有限值。
#[derive(Clone)]
pub(in crate::nn) struct Clip {
    min: f32,
    max: f32,
}

impl Clip {
    pub(in crate::nn) fn new(min: f32, max: f32) -> Result<Self, GraphError> {
        if !(min < max) {
            return Err(GraphError::InvalidConfig(format!(
                "Clip节点要求min < max，但得到min={min}，max={max}"
            )));
        }
        Ok(Self { min, max })
    }
}

impl TraitNode for Clip {
    fn type_name(&self) -> &'static str {
        "clip"
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
        let (min, max) = (self.min, self.max);
        value.map_from(parents[0], |x| x.clamp(min, max));
        Ok(())
    }

    fn bprop(
        &self,
        parents: &[&Tensor],
        _value: &Tensor,
        grad: &Tensor,
        _phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        let (min, max) = (self.min, self.max);
        Ok(vec![pointwise_grad(parents[0], grad, |x, g| {
            if (min..=max).contains(&x) { g } else { 0.0 }
        })])
    }
}
