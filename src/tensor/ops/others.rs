use crate::errors::TensorError;
use crate::tensor::Tensor;
use ndarray::Axis;
use std::cmp::PartialEq;

impl From<f32> for Tensor {
    /// 实现 From<f32> trait 用于将`f32`类型转换为形状为`[1]`的张量
    fn from(scalar: f32) -> Self {
        Tensor::new(&[scalar], &[1])
    }
}

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Tensor {
    /// 对张量中的所有元素求和并返回一个形状为[1]的标量。
    pub fn sum(&self) -> Tensor {
        Tensor::from(self.data.sum())
    }

    /// 所有元素的均值（纯数）。空张量返回`0.0`
    pub fn mean(&self) -> f32 {
        self.data.mean().unwrap_or(0.0)
    }

    /// 把经过广播的张量沿被广播的维度求和，还原为`shape`。
    /// 这是广播的逆运算，用于二元节点把梯度还原到各自父节点的形状上。
    pub fn sum_to_shape(&self, shape: &[usize]) -> Tensor {
        if self.shape() == shape {
            return self.clone();
        }
        let mut data = self.data.clone();
        while data.ndim() > shape.len() {
            data = data.sum_axis(Axis(0));
        }
        for (axis, &dim) in shape.iter().enumerate() {
            if dim == 1 && data.shape()[axis] != 1 {
                data = data.sum_axis(Axis(axis)).insert_axis(Axis(axis));
            }
        }
        assert!(data.shape() == shape, "{}", TensorError::IncompatibleShape);
        Tensor { data }
    }

    /// 逐元素截断到`[min, max]`闭区间
    pub fn clip(&self, min: f32, max: f32) -> Tensor {
        Tensor {
            data: self.data.mapv(|x| x.clamp(min, max)),
        }
    }

    /// 逐元素取自然对数
    pub fn ln(&self) -> Tensor {
        Tensor {
            data: self.data.mapv(f32::ln),
        }
    }
}
