/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : Graph 反向传播：梯度由图统一清零、播种与累加
 */

use super::forward::parent_values;
use super::{Graph, GraphError};
use crate::nn::{NodeId, Phase};
use crate::tensor::Tensor;

impl Graph {
    /// 设置根节点的种子梯度（对标量损失通常为全 1）
    pub fn set_out_grad(&mut self, root: NodeId, seed: &Tensor) -> Result<(), GraphError> {
        let node = self.get_node(root)?;
        if let Some(shape) = node.shape() {
            if shape != seed.shape() {
                return Err(GraphError::ShapeMismatch {
                    expected: shape.to_vec(),
                    got: seed.shape().to_vec(),
                    message: format!("{node}的种子梯度形状与其输出不一致"),
                });
            }
        }
        self.out_grads.insert(root, seed.clone());
        Ok(())
    }

    /// 反向传播
    ///
    /// 1. 所有节点的梯度清零；
    /// 2. 各根节点的梯度设为其种子梯度；
    /// 3. 按前向顺序的逆序，每个节点把对各父节点的梯度贡献累加进父节点的梯度。
    ///    逆序保证一个节点的所有下游节点都先于它执行，所以轮到它时梯度已累加完毕；
    /// 4. 参数节点的梯度累加回各自的共享参数（共享参数的梯度先清零）。
    ///
    /// 须在同一轮的`fprop`之后调用（仅在 debug 构建中检查）。
    pub fn bprop(&mut self) -> Result<(), GraphError> {
        self.check_setup()?;
        debug_assert!(
            self.last_forward_pass_id > self.last_backward_pass_id,
            "图{}在反向传播前没有执行前向传播",
            self.name
        );
        if self.phase == Phase::Test {
            log::warn!("在test阶段对图{}调用bprop，这通常是误用", self.name);
        }

        // 1. 清零
        for node in self.nodes.values_mut() {
            node.zero_grad();
        }

        // 2. 播种
        for index in 0..self.roots.len() {
            let root = self.roots[index];
            let seed = self.out_grads.get(&root).ok_or_else(|| {
                GraphError::InvalidOperation(format!(
                    "根节点{root}没有种子梯度，请先调用set_out_grad"
                ))
            })?;
            self.nodes
                .get_mut(&root)
                .ok_or(GraphError::NodeNotFound(root))?
                .seed_grad(seed)?;
        }

        // 3. 逆序传播
        let phase = self.phase;
        for &node_id in self.order.iter().rev() {
            let parent_ids = match self.backward_edges.get(&node_id) {
                Some(parent_ids) if !parent_ids.is_empty() => parent_ids,
                _ => continue,
            };
            let contributions = {
                let node = self.nodes.get(&node_id).ok_or(GraphError::NodeNotFound(node_id))?;
                let parents = parent_values(&self.nodes, parent_ids)?;
                node.bprop(&parents, phase)?
            };
            for (parent_id, contribution) in parent_ids.iter().zip(&contributions) {
                self.nodes
                    .get_mut(parent_id)
                    .ok_or(GraphError::NodeNotFound(*parent_id))?
                    .accumulate_grad(contribution)?;
            }
        }

        // 4. 参数梯度
        for node in self.nodes.values() {
            if let Some(parameter) = node.parameter() {
                parameter.zero_grad();
            }
        }
        for node in self.nodes.values() {
            if let (Some(parameter), Some(grad)) = (node.parameter(), node.grad()) {
                parameter.accumulate_grad(grad);
            }
        }

        self.last_backward_pass_id = self.last_forward_pass_id;
        log::trace!(
            "图{}完成第{}次反向传播",
            self.name,
            self.last_backward_pass_id
        );
        Ok(())
    }
}
