/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : Graph 模块：计算图的核心实现
 *
 * 各 impl 块分散在子模块中：
 * - core.rs: 创建、基础访问器、ID/名称生成
 * - node_builders.rs: new_*_node
 * - setup.rs: 拓扑排序 + 形状推导 + 缓冲区分配
 * - forward.rs: 前向传播
 * - backward.rs: 反向传播与梯度累加
 * - mode.rs: train/test 阶段
 */

mod backward;
mod core;
mod error;
mod forward;
mod mode;
mod node_builders;
mod setup;

pub use error::GraphError;

use crate::nn::nodes::NodeHandle;
use crate::nn::{NodeId, Phase};
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use std::collections::HashMap;

/// 计算图
///
/// 节点只能引用已存在的节点作为父节点，因此图天然无环。
/// 使用流程：`new_*_node`构建 → `setup`（拓扑排序、推导形状、分配缓冲区）
/// → 反复执行`set_node_value`（喂数据）、`fprop`、`set_out_grad`/`bprop`。
pub struct Graph {
    name: String,
    nodes: HashMap<NodeId, NodeHandle>,
    /// 正向边：parent_id -> child_ids（父节点指向子节点）
    forward_edges: HashMap<NodeId, Vec<NodeId>>,
    /// 反向边：child_id -> parent_ids（子节点指向父节点，保持声明顺序）
    backward_edges: HashMap<NodeId, Vec<NodeId>>,
    next_id: u64,
    /// 节点名 -> 节点 id
    names: HashMap<String, NodeId>,
    /// 各节点类型自动命名的下一个候选序号
    name_counters: HashMap<&'static str, usize>,
    /// setup 时指定的根节点
    roots: Vec<NodeId>,
    /// setup 确定的执行顺序（父节点总在子节点之前）
    order: Vec<NodeId>,
    /// 各根节点的种子梯度
    out_grads: HashMap<NodeId, Tensor>,
    is_setup: bool,
    phase: Phase,
    /// 图级别的随机数生成器（用于 Dropout 掩码、随机噪声节点等）
    rng: StdRng,
    /// 最后一次前向传播的 id
    last_forward_pass_id: u64,
    /// 最后一次反向传播的 id
    last_backward_pass_id: u64,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
