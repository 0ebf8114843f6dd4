//! 张量运算的错误。张量层的错误都以 panic 的形式抛出（消息即错误的`Display`），
//! 计算图在调用张量运算前负责校验形状，并以`GraphError`返回给调用方。

use std::fmt;
use thiserror::Error;

/// 需要两个张量形状相容的运算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    AddAssign,
    Sub,
    Mul,
    Div,
    MatMul,
    Assign,
    Concat,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "相加",
            Self::AddAssign => "自相加",
            Self::Sub => "相减",
            Self::Mul => "相乘",
            Self::Div => "相除",
            Self::MatMul => "矩阵相乘",
            Self::Assign => "赋值",
            Self::Concat => "拼接",
        })
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },

    #[error("张量列表为空")]
    EmptyList,
    #[error("张量形状不一致")]
    InconsistentShape,
    #[error("张量形状不兼容")]
    IncompatibleShape,
    #[error("维度{axis}超出张量的维数{dimension}")]
    AxisOutOfRange { axis: usize, dimension: usize },
    #[error("矩阵乘法要求两个2阶张量，但得到的维数为{0}和{1}")]
    NotMatrix(usize, usize),
    #[error("数据长度{data_len}与形状{shape:?}的元素个数不符")]
    DataLengthMismatch { data_len: usize, shape: Vec<usize> },
}
