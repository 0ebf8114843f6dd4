/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : Graph setup：拓扑排序、形状推导与缓冲区分配
 */

use super::{Graph, GraphError};
use crate::nn::NodeId;
use std::collections::HashSet;

impl Graph {
    /// 以`roots`为根完成 setup
    ///
    /// 1. 从各根节点出发做一次深度优先遍历，得到执行顺序：每个可达节点只出现一次，
    ///    且排在其所有父节点之后（父节点按声明顺序访问）；
    /// 2. 按该顺序逐个推导输出形状并分配输出/梯度缓冲区，形状不合法时立即返回错误；
    /// 3. 不可达的节点释放缓冲区。
    ///
    /// 重新 setup 会按新的形状重新分配所有缓冲区。
    pub fn setup(&mut self, roots: &[NodeId]) -> Result<(), GraphError> {
        if roots.is_empty() {
            return Err(GraphError::InvalidOperation(
                "setup至少需要指定1个根节点".to_string(),
            ));
        }
        for &root in roots {
            self.get_node(root)?;
        }
        self.is_setup = false;

        let order = self.topological_order(roots);
        let reachable: HashSet<NodeId> = order.iter().copied().collect();
        for (id, node) in &mut self.nodes {
            if !reachable.contains(id) {
                node.release_buffers();
            }
        }

        for &node_id in &order {
            let parent_ids = self.backward_edges.get(&node_id).map(Vec::as_slice).unwrap_or(&[]);
            let parent_shapes = parent_ids
                .iter()
                .map(|parent_id| {
                    let parent = self.nodes.get(parent_id).ok_or(GraphError::NodeNotFound(*parent_id))?;
                    parent.shape().map(<[usize]>::to_vec).ok_or_else(|| {
                        GraphError::ComputationError(format!(
                            "{parent}的形状尚未确定。不该触及本错误，否则说明拓扑排序有问题"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let parent_shape_refs: Vec<&[usize]> = parent_shapes.iter().map(Vec::as_slice).collect();
            self.get_node_mut(node_id)?.setup(&parent_shape_refs)?;
        }

        self.out_grads.retain(|id, _| roots.contains(id));
        log::debug!(
            "图{}完成setup：根节点{:?}，共{}个可达节点",
            self.name,
            roots,
            order.len()
        );
        self.roots = roots.to_vec();
        self.order = order;
        self.is_setup = true;
        Ok(())
    }

    /// 深度优先后序遍历得到的拓扑顺序
    ///
    /// 不递归，用显式栈遍历。栈中每项为`(节点, 下一个待访问父节点的下标)`，
    /// 父节点按声明顺序访问，全部访问完后该节点才进入顺序。
    pub(in crate::nn::graph) fn topological_order(&self, roots: &[NodeId]) -> Vec<NodeId> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = Vec::new();

        for &root in roots {
            if !visited.insert(root) {
                continue;
            }
            stack.push((root, 0));
            while let Some((id, next_parent)) = stack.last_mut() {
                let parents = self.backward_edges.get(&*id).map(Vec::as_slice).unwrap_or(&[]);
                match parents.get(*next_parent) {
                    Some(&parent) => {
                        *next_parent += 1;
                        if visited.insert(parent) {
                            stack.push((parent, 0));
                        }
                    }
                    None => {
                        order.push(*id);
                        stack.pop();
                    }
                }
            }
        }
        order
    }

    pub(in crate::nn::graph) fn check_setup(&self) -> Result<(), GraphError> {
        if !self.is_setup {
            return Err(GraphError::InvalidOperation(format!(
                "图{}尚未setup（或在setup之后又被修改），请先调用setup",
                self.name
            )));
        }
        Ok(())
    }
}
