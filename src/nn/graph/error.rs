/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : Graph 模块的错误类型
 */

use crate::nn::NodeId;
use thiserror::Error;

/// Graph 操作错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("节点{0}不存在")]
    NodeNotFound(NodeId),
    #[error("非法操作：{0}")]
    InvalidOperation(String),
    #[error("形状不匹配：预期{expected:?}，实际{got:?}。{message}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    #[error("维数不匹配：预期{expected}，实际{got}。{message}")]
    DimensionMismatch {
        expected: usize,
        got: usize,
        message: String,
    },
    #[error("计算错误：{0}")]
    ComputationError(String),
    #[error("{0}")]
    DuplicateNodeName(String),
    /// 运行阶段只能是`train`或`test`
    #[error("无法识别的运行阶段`{0}`，只能是`train`或`test`")]
    InvalidPhase(String),
    #[error("配置错误：{0}")]
    InvalidConfig(String),
}
