/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : Graph 核心操作：创建、访问器、ID/名称生成
 */

use super::{Graph, GraphError};
use crate::nn::nodes::{NodeHandle, NodeType};
use crate::nn::{NodeId, Parameter, Phase};
use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

impl Graph {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self::with_name("default_graph")
    }

    pub fn with_name(name: &str) -> Self {
        Self::with_name_and_rng(name, StdRng::from_entropy())
    }

    /// 创建一个带固定种子的计算图（确保 Dropout 掩码和随机噪声可重复）
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_name_and_seed("default_graph", seed)
    }

    /// 创建一个带名称和固定种子的计算图
    pub fn with_name_and_seed(name: &str, seed: u64) -> Self {
        Self::with_name_and_rng(name, StdRng::seed_from_u64(seed))
    }

    fn with_name_and_rng(name: &str, rng: StdRng) -> Self {
        Self {
            name: name.to_string(),
            nodes: HashMap::new(),
            forward_edges: HashMap::new(),
            backward_edges: HashMap::new(),
            next_id: 0,
            names: HashMap::new(),
            name_counters: HashMap::new(),
            roots: Vec::new(),
            order: Vec::new(),
            out_grads: HashMap::new(),
            is_setup: false,
            phase: Phase::Train,
            rng,
            last_forward_pass_id: 0,
            last_backward_pass_id: 0,
        }
    }

    /// 设置/重置图的随机种子
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    // ========== 基础访问器 ==========

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub const fn is_setup(&self) -> bool {
        self.is_setup
    }

    /// setup 时指定的根节点
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// setup 确定的执行顺序：每个节点都排在其所有父节点之后
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub const fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub const fn last_backward_pass_id(&self) -> u64 {
        self.last_backward_pass_id
    }

    pub(in crate::nn) fn get_node(&self, id: NodeId) -> Result<&NodeHandle, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_node_mut(&mut self, id: NodeId) -> Result<&mut NodeHandle, GraphError> {
        self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn get_node_parents(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        // 先检查节点是否存在
        let _ = self.get_node(id)?;
        Ok(self.backward_edges.get(&id).cloned().unwrap_or_default())
    }

    pub fn get_node_children(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        // 先检查节点是否存在
        let _ = self.get_node(id)?;
        Ok(self.forward_edges.get(&id).cloned().unwrap_or_default())
    }

    pub fn get_node_name(&self, id: NodeId) -> Result<&str, GraphError> {
        Ok(self.get_node(id)?.name())
    }

    pub fn get_node_type_name(&self, id: NodeId) -> Result<&'static str, GraphError> {
        Ok(self.get_node(id)?.type_name())
    }

    /// 按名称查找节点
    pub fn get_node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// 节点的输出形状（未 setup 时为`None`）
    pub fn get_node_shape(&self, id: NodeId) -> Result<Option<&[usize]>, GraphError> {
        Ok(self.get_node(id)?.shape())
    }

    pub fn get_node_value(&self, id: NodeId) -> Result<Option<&Tensor>, GraphError> {
        Ok(self.get_node(id)?.value())
    }

    pub fn get_node_grad(&self, id: NodeId) -> Result<Option<&Tensor>, GraphError> {
        Ok(self.get_node(id)?.grad())
    }

    /// 为 Source 节点写入外部数据（形状须与其声明的形状一致）
    pub fn set_node_value(&mut self, id: NodeId, value: &Tensor) -> Result<(), GraphError> {
        let node = self.get_node_mut(id)?;
        let NodeType::Source(source) = node.raw_node() else {
            return Err(GraphError::InvalidOperation(format!(
                "{node}不是Source节点，其值不应该被手动设置"
            )));
        };
        if source.shape() != value.shape() {
            return Err(GraphError::ShapeMismatch {
                expected: source.shape().to_vec(),
                got: value.shape().to_vec(),
                message: format!("写入{node}的值形状不符"),
            });
        }
        node.set_value(value);
        Ok(())
    }

    /// 改变 Source 节点声明的形状。下游形状随之失效，须重新`setup`
    pub fn set_source_shape(&mut self, id: NodeId, shape: &[usize]) -> Result<(), GraphError> {
        let node = self.get_node_mut(id)?;
        let node_display = node.to_string();
        let NodeType::Source(source) = node.raw_node_mut() else {
            return Err(GraphError::InvalidOperation(format!(
                "{node_display}不是Source节点，无法改变其形状"
            )));
        };
        source.set_shape(shape);
        node.release_buffers();
        self.is_setup = false;
        Ok(())
    }

    /// 图中引用的所有共享参数（按节点 id 顺序，同一参数只出现一次）
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut parameters: Vec<Parameter> = Vec::new();
        for id in self.nodes() {
            if let Some(parameter) = self.nodes.get(&id).and_then(NodeHandle::parameter) {
                if !parameters.iter().any(|p| p.ptr_eq(parameter)) {
                    parameters.push(parameter.clone());
                }
            }
        }
        parameters
    }

    // ========== ID/名称生成 ==========

    pub(in crate::nn::graph) fn generate_valid_node_id(&mut self) -> NodeId {
        // 生成唯一的节点ID（先递增再返回，所以第一个节点 ID 是 1）
        self.next_id += 1;
        NodeId(self.next_id)
    }

    pub(in crate::nn::graph) fn check_duplicate_node_name(&self, name: &str) -> Result<(), GraphError> {
        if self.names.contains_key(name) {
            return Err(GraphError::DuplicateNodeName(format!(
                "节点{}在图{}中重复",
                name,
                self.name()
            )));
        }
        Ok(())
    }

    /// 给定名称时检查是否重复；未给定时生成`"{node_type}_{n}"`。
    /// 节点不会被删除，所以各类型的序号只增不减，跳过已被占用的名称即可
    pub(in crate::nn::graph) fn generate_valid_new_node_name(
        &mut self,
        base_name: &str,
        node_type: &'static str,
    ) -> Result<String, GraphError> {
        if !base_name.is_empty() {
            self.check_duplicate_node_name(base_name)?;
            return Ok(base_name.to_string());
        }

        let counter = self.name_counters.entry(node_type).or_insert(1);
        loop {
            let name = format!("{node_type}_{counter}");
            *counter += 1;
            if !self.names.contains_key(&name) {
                return Ok(name);
            }
        }
    }

    /// 登记新节点的名称
    pub(in crate::nn::graph) fn register_node_name(&mut self, name: &str, id: NodeId) {
        self.names.insert(name.to_string(), id);
    }
}
