/*
 * @Author       : 老董
 * @Date         : 2023-08-17 17:24:24
 * @Description  : 数值后端：基于`ndarray`的动态维度张量。
 *                 计算图只通过本模块提供的接口分配张量、做逐元素运算、归约与随机采样；
 *                 其中带`_into`/`_from`/`_`后缀的方法都是原地写入，供节点前向传播的热路径使用。
 */

use ndarray::{Array, ArrayD, IxDyn};

use crate::errors::TensorError;

mod ops {
    pub mod arithmetic;
    pub mod neg;
    pub mod others;
}

mod inplace;
mod print;
mod property;
mod random;
mod shape;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通Tensor初始化的都是张量（即使标量也是张量）；
/// 而通常意义上的数字（类型为usize、i32、f64等）就只是纯数（number），在这里不被认为是张量。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: ArrayD<f32>,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]、[1,1,1]...
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]；
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等，否则panic。
    pub fn new(data: &[f32], shape: &[usize]) -> Tensor {
        let expected_len = shape.iter().product::<usize>();
        assert!(
            data.len() == expected_len,
            "{}",
            TensorError::DataLengthMismatch {
                data_len: data.len(),
                shape: shape.to_vec(),
            }
        );
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).unwrap();
        Tensor { data }
    }

    /// 创建一个全零张量
    pub fn zeros(shape: &[usize]) -> Tensor {
        Tensor {
            data: ArrayD::zeros(IxDyn(shape)),
        }
    }

    /// 创建一个全一张量
    pub fn ones(shape: &[usize]) -> Tensor {
        Tensor {
            data: ArrayD::ones(IxDyn(shape)),
        }
    }

    /// 创建一个所有元素都为`value`的张量
    pub fn full(value: f32, shape: &[usize]) -> Tensor {
        Tensor {
            data: ArrayD::from_elem(IxDyn(shape), value),
        }
    }
}
