use super::Tensor;
use crate::errors::{Operator, TensorError};
use ndarray::{Axis, Slice};

impl Tensor {
    /// 2阶张量（矩阵）的转置；更高阶时逆序所有维度
    pub fn transpose(&self) -> Self {
        Self {
            data: self.data.t().as_standard_layout().into_owned(),
        }
    }

    /// NumPy 风格的广播形状推导
    ///
    /// 从右向左对齐维度，每个维度必须相等或其中一个为 1；
    /// 维度数不同时，较短的形状前面补 1。不兼容时返回`None`。
    pub fn broadcast_shape(shape_1: &[usize], shape_2: &[usize]) -> Option<Vec<usize>> {
        let rank = shape_1.len().max(shape_2.len());
        let mut result = vec![0; rank];
        for i in 0..rank {
            let dim_1 = if i < rank - shape_1.len() {
                1
            } else {
                shape_1[i - (rank - shape_1.len())]
            };
            let dim_2 = if i < rank - shape_2.len() {
                1
            } else {
                shape_2[i - (rank - shape_2.len())]
            };
            result[i] = match (dim_1, dim_2) {
                (a, b) if a == b => a,
                (1, b) => b,
                (a, 1) => a,
                _ => return None,
            };
        }
        Some(result)
    }

    pub fn can_broadcast_with(&self, other: &Self) -> bool {
        Self::broadcast_shape(self.shape(), other.shape()).is_some()
    }

    /// 沿`axis`截取`[start, end)`区间，返回新张量
    pub fn slice_axis(&self, axis: usize, start: usize, end: usize) -> Self {
        self.check_axis(axis);
        Self {
            data: self
                .data
                .slice_axis(Axis(axis), Slice::from(start..end))
                .to_owned(),
        }
    }

    /// 将多个张量沿`axis`拼接起来，返回一个新的张量。
    /// 除`axis`外其余维度必须一致，否则panic。
    pub fn concat(axis: usize, tensors: &[&Self]) -> Self {
        assert!(!tensors.is_empty(), "{}", TensorError::EmptyList);
        let mut shape = tensors[0].shape().to_vec();
        tensors[0].check_axis(axis);
        shape[axis] = tensors.iter().map(|t| t.shape().get(axis).copied().unwrap_or(0)).sum();
        let mut result = Self::zeros(&shape);
        result.concat_into(axis, tensors);
        result
    }

    /// 把各张量沿`axis`依次写入本张量（原地，不分配内存）
    pub fn concat_into(&mut self, axis: usize, tensors: &[&Self]) {
        self.check_axis(axis);
        let mut start = 0;
        for tensor in tensors {
            let compatible = tensor.dimension() == self.dimension()
                && tensor
                    .shape()
                    .iter()
                    .zip(self.shape())
                    .enumerate()
                    .all(|(i, (a, b))| i == axis || a == b);
            assert!(
                compatible,
                "{}",
                TensorError::OperatorError {
                    operator: Operator::Concat,
                    tensor1_shape: self.shape().to_vec(),
                    tensor2_shape: tensor.shape().to_vec(),
                }
            );
            let end = start + tensor.shape()[axis];
            self.data
                .slice_axis_mut(Axis(axis), Slice::from(start..end))
                .assign(&tensor.data);
            start = end;
        }
        assert!(
            start == self.shape()[axis],
            "{}",
            TensorError::InconsistentShape
        );
    }

    fn check_axis(&self, axis: usize) {
        assert!(
            axis < self.dimension(),
            "{}",
            TensorError::AxisOutOfRange {
                axis,
                dimension: self.dimension(),
            }
        );
    }
}
