/*
 * @Author       : 老董
 * @Description  : 计算图的运行阶段（训练/推理）
 */

use super::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 图级别的运行阶段
///
/// 由`Graph::set_phase`统一设置，并在每次前向传播时传给图中的每个节点，
/// 受阶段影响的节点（如 Dropout）据此选择行为。
/// 从字符串解析时只接受`"train"`和`"test"`，其余一律报`GraphError::InvalidPhase`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Phase {
    #[default]
    Train,
    Test,
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Test => "test",
        }
    }
}

impl FromStr for Phase {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Self::Train),
            "test" => Ok(Self::Test),
            other => Err(GraphError::InvalidPhase(other.to_string())),
        }
    }
}

impl TryFrom<String> for Phase {
    type Error = GraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
