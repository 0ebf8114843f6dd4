/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : Graph 前向传播
 */

use super::{Graph, GraphError};
use crate::nn::nodes::{NodeHandle, PassContext};
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::collections::HashMap;

impl Graph {
    /// 前向传播：按 setup 确定的顺序依次计算每个节点的值
    ///
    /// Source 节点被跳过，其值须事先由`set_node_value`写入（未写入时为 setup 分配的全零缓冲区）。
    pub fn fprop(&mut self) -> Result<(), GraphError> {
        self.check_setup()?;
        let phase = self.phase;

        for index in 0..self.order.len() {
            let node_id = self.order[index];
            let mut node = self
                .nodes
                .remove(&node_id)
                .ok_or(GraphError::NodeNotFound(node_id))?;
            if node.is_source() {
                self.nodes.insert(node_id, node);
                continue;
            }
            // 本节点已暂时移出，父节点的值可以与之同时借用
            let result = {
                let parent_ids = self.backward_edges.get(&node_id).map(Vec::as_slice).unwrap_or(&[]);
                match parent_values(&self.nodes, parent_ids) {
                    Ok(parents) => {
                        let mut ctx = PassContext {
                            phase,
                            rng: &mut self.rng,
                        };
                        node.fprop(&parents, &mut ctx)
                    }
                    Err(e) => Err(e),
                }
            };
            self.nodes.insert(node_id, node);
            result?;
        }

        self.last_forward_pass_id += 1;
        log::trace!(
            "图{}完成第{}次前向传播（阶段：{}）",
            self.name,
            self.last_forward_pass_id,
            phase
        );
        Ok(())
    }
}

/// 按声明顺序取出各父节点的值
pub(in crate::nn::graph) fn parent_values<'a>(
    nodes: &'a HashMap<NodeId, NodeHandle>,
    parent_ids: &[NodeId],
) -> Result<Vec<&'a Tensor>, GraphError> {
    parent_ids
        .iter()
        .map(|parent_id| {
            let parent = nodes.get(parent_id).ok_or(GraphError::NodeNotFound(*parent_id))?;
            parent.value().ok_or_else(|| {
                GraphError::ComputationError(format!(
                    "{parent}没有值。不该触及本错误，否则说明crate代码有问题"
                ))
            })
        })
        .collect()
}
