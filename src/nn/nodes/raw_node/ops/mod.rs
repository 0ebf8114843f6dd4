mod add;
mod clip;
mod concatenate;
mod dropout;
mod leaky_relu;
mod log;
mod mat_mul;
mod multiply;
mod negative;
mod negative_gradient;
mod sigmoid;
mod sum;

pub(in crate::nn) use add::Add;
pub(in crate::nn) use clip::Clip;
pub(in crate::nn) use concatenate::Concatenate;
pub use dropout::MaskPolicy;
pub(in crate::nn) use dropout::Dropout;
pub(in crate::nn) use leaky_relu::LeakyReLU;
pub(in crate::nn) use log::Log;
pub(in crate::nn) use mat_mul::MatMul;
pub(in crate::nn) use multiply::Multiply;
pub(in crate::nn) use negative::Negative;
pub(in crate::nn) use negative_gradient::NegativeGradient;
pub(in crate::nn) use sigmoid::Sigmoid;
pub(in crate::nn) use sum::Sum;

use super::check_parent_count;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 逐元素一元节点的 setup：恰有1个父节点，输出形状与之相同
fn unary_setup(type_name: &str, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
    check_parent_count(type_name, parent_shapes, 1)?;
    Ok(parent_shapes[0].to_vec())
}

/// 逐元素二元节点的 setup：恰有2个父节点，输出形状为两者广播后的形状
fn broadcast_setup(type_name: &str, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
    check_parent_count(type_name, parent_shapes, 2)?;
    Tensor::broadcast_shape(parent_shapes[0], parent_shapes[1]).ok_or_else(|| {
        GraphError::ShapeMismatch {
            expected: parent_shapes[0].to_vec(),
            got: parent_shapes[1].to_vec(),
            message: format!("{type_name}节点的两个父节点形状无法广播"),
        }
    })
}

/// 逐元素求导：返回与`x`同形状的`f(x, grad)`
fn pointwise_grad<F>(x: &Tensor, grad: &Tensor, f: F) -> Tensor
where
    F: Fn(f32, f32) -> f32,
{
    let mut result = Tensor::zeros(x.shape());
    result.zip_from(x, grad, f);
    result
}
