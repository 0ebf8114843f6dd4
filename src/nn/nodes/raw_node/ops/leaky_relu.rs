use super::{pointwise_grad, unary_setup};
use crate::nn::nodes::raw_node::{PassContext, TraitNode};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// Leaky ReLU 激活函数节点
///
/// forward: f(x) = x if x > 0, else negative_slope * x
/// backward: d(f)/dx = 1 if x > 0, else negative_slope
///
/// 当 negative_slope = 0 时，等价于标准 ReLU
#[derive(Clone)]
pub(in crate::nn) struct LeakyReLU {
    negative_slope: f32,
}

impl LeakyReLU {
    pub(in crate::nn) fn new(negative_slope: f32) -> Result<Self, GraphError> {
        if !(negative_slope >= 0.0) {
            return Err(GraphError::InvalidConfig(format!(
                "LeakyReLU的negative_slope应为非负数，但得到: {negative_slope}"
            )));
        }
        Ok(Self { negative_slope })
    }
}

impl TraitNode for LeakyReLU {
    fn type_name(&self) -> &'static str {
        "leaky_relu"
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
        let slope = self.negative_slope;
        value.map_from(parents[0], |x| if x > 0.0 { x } else { slope * x });
        Ok(())
    }

    fn bprop(
        &self,
        parents: &[&Tensor],
        _value: &Tensor,
        grad: &Tensor,
        _phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        let slope = self.negative_slope;
        Ok(vec![pointwise_grad(parents[0], grad, |x, g| {
            if x > 0.0 { g } else { slope * g }
        })])
    }
}
