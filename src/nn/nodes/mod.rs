/*
 * @Author       : 老董
 * @Date         : 2024-01-31 20:23:53
 * @Description  : 计算图节点：节点ID、节点句柄与各类节点实现
 */

mod node_handle;
pub(in crate::nn) mod raw_node;

pub(in crate::nn) use node_handle::NodeHandle;
pub use raw_node::MaskPolicy;
pub(in crate::nn) use raw_node::{NodeType, PassContext, TraitNode};

use std::fmt;

/// 节点在其所属计算图中的唯一标识（从 1 开始递增）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
