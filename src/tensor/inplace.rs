/*
 * @Author       : 老董
 * @Description  : 原地（in-place）运算：只写入已分配好的张量，不再分配新内存。
 *                 计算图在 setup 阶段为每个节点分配好输出缓冲区后，前向传播只调用这里的方法。
 *                 形状不符属于调用方的编程错误，直接 panic。
 */

use super::Tensor;
use crate::errors::{Operator, TensorError};
use ndarray::linalg::general_mat_mul;
use ndarray::{Ix2, IxDyn, Zip};

impl Tensor {
    /// 将所有元素置为`value`
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// 拷贝`src`的值（形状必须一致）
    pub fn assign(&mut self, src: &Tensor) {
        self.assert_same_shape(src, Operator::Assign);
        self.data.assign(&src.data);
    }

    /// 把`src`所有元素之和写入本张量（本张量须只有1个元素）
    pub fn sum_from(&mut self, src: &Tensor) {
        assert!(
            self.size() == 1,
            "{}",
            TensorError::OperatorError {
                operator: Operator::Assign,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: vec![1],
            }
        );
        self.data.fill(src.data.sum());
    }

    /// self[i] = f(src[i])
    pub fn map_from<F>(&mut self, src: &Tensor, f: F)
    where
        F: Fn(f32) -> f32,
    {
        self.assert_same_shape(src, Operator::Assign);
        Zip::from(&mut self.data)
            .and(&src.data)
            .for_each(|out, &x| *out = f(x));
    }

    /// self[i] = f(a[i], b[i])；`a`、`b`会被广播到本张量的形状
    pub fn zip_from<F>(&mut self, a: &Tensor, b: &Tensor, f: F)
    where
        F: Fn(f32, f32) -> f32,
    {
        let shape = IxDyn(self.shape());
        let (a_view, b_view) = match (a.data.broadcast(shape.clone()), b.data.broadcast(shape)) {
            (Some(a_view), Some(b_view)) => (a_view, b_view),
            _ => panic!(
                "{}",
                TensorError::OperatorError {
                    operator: Operator::Assign,
                    tensor1_shape: a.shape().to_vec(),
                    tensor2_shape: b.shape().to_vec(),
                }
            ),
        };
        Zip::from(&mut self.data)
            .and(a_view)
            .and(b_view)
            .for_each(|out, &x, &y| *out = f(x, y));
    }

    /// self = a · b（两者均须为矩阵，本张量形状须为`[a.rows, b.cols]`）
    pub fn mat_mul_into(&mut self, a: &Tensor, b: &Tensor) {
        let (a_2d, b_2d) = match (
            a.data.view().into_dimensionality::<Ix2>(),
            b.data.view().into_dimensionality::<Ix2>(),
        ) {
            (Ok(a_2d), Ok(b_2d)) => (a_2d, b_2d),
            _ => panic!("{}", TensorError::NotMatrix(a.dimension(), b.dimension())),
        };
        let expected = [a_2d.nrows(), b_2d.ncols()];
        assert!(
            a_2d.ncols() == b_2d.nrows() && self.shape() == &expected[..],
            "{}",
            TensorError::OperatorError {
                operator: Operator::MatMul,
                tensor1_shape: a.shape().to_vec(),
                tensor2_shape: b.shape().to_vec(),
            }
        );
        let self_dimension = self.dimension();
        let mut out = match self.data.view_mut().into_dimensionality::<Ix2>() {
            Ok(out) => out,
            Err(_) => panic!("{}", TensorError::NotMatrix(self_dimension, 2)),
        };
        general_mat_mul(1.0, &a_2d, &b_2d, 0.0, &mut out);
    }

    /// 返回 self · other 的新张量
    pub fn mat_mul(&self, other: &Tensor) -> Tensor {
        let rows = self.shape().first().copied().unwrap_or(0);
        let cols = other.shape().get(1).copied().unwrap_or(0);
        let mut result = Tensor::zeros(&[rows, cols]);
        result.mat_mul_into(self, other);
        result
    }

    fn assert_same_shape(&self, other: &Tensor, operator: Operator) {
        assert!(
            self.is_same_shape(other),
            "{}",
            TensorError::OperatorError {
                operator,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
    }
}
