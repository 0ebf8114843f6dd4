/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : Graph 节点构建方法（new_*_node）
 */

use super::{Graph, GraphError};
use crate::nn::nodes::raw_node::{
    Add, Clip, Concatenate, Constant, Dropout, LeakyReLU, Log, MatMul, Multiply, Negative,
    NegativeGradient, ParameterNode, RandomNormal, Sigmoid, Source, Sum,
};
use crate::nn::nodes::{MaskPolicy, NodeHandle, NodeType, TraitNode};
use crate::nn::{NodeId, Parameter};
use crate::tensor::Tensor;

impl Graph {
    /// 添加节点到列表
    ///
    /// 父节点必须已存在于本图中，所以新节点不可能成环。
    /// 添加节点后图需要重新 setup。
    pub(in crate::nn::graph) fn add_node_to_list(
        &mut self,
        raw_node: NodeType,
        name: Option<&str>,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        for &parent_id in parents {
            self.get_node(parent_id)?;
        }
        let node_name = self.generate_valid_new_node_name(name.unwrap_or(""), raw_node.type_name())?;
        let node_id = self.generate_valid_node_id();

        for &parent_id in parents {
            self.forward_edges.entry(parent_id).or_default().push(node_id);
        }
        self.backward_edges.entry(node_id).or_default().extend(parents);

        let mut node_handle = NodeHandle::new(raw_node);
        node_handle.bind_id_and_name(node_id, &node_name);
        self.register_node_name(&node_name, node_id);
        self.nodes.insert(node_id, node_handle);
        self.is_setup = false;
        Ok(node_id)
    }

    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓无父节点↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    /// 创建数据源节点，其值由`set_node_value`在每次前向传播前写入
    pub fn new_source_node(&mut self, shape: &[usize], name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_node_to_list(Source::new(shape).into(), name, &[])
    }

    /// 创建常量节点
    pub fn new_constant_node(&mut self, value: &Tensor, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_node_to_list(Constant::new(value).into(), name, &[])
    }

    /// 创建随机噪声节点，每次前向传播都从 N(mean, std_dev²) 重新采样
    pub fn new_random_normal_node(
        &mut self,
        shape: &[usize],
        mean: f32,
        std_dev: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = RandomNormal::new(shape, mean, std_dev)?;
        self.add_node_to_list(node.into(), name, &[])
    }

    /// 创建参数节点，引用一个（可在多张图之间共享的）参数
    pub fn new_parameter_node(
        &mut self,
        parameter: &Parameter,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.add_node_to_list(ParameterNode::new(parameter).into(), name, &[])
    }
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑无父节点↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓一元算子↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    pub fn new_negative_node(&mut self, parent: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_node_to_list(Negative.into(), name, &[parent])
    }

    /// 创建梯度反转节点：前向恒等，反向取负
    pub fn new_negative_gradient_node(
        &mut self,
        parent: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.add_node_to_list(NegativeGradient.into(), name, &[parent])
    }

    pub fn new_clip_node(
        &mut self,
        parent: NodeId,
        min: f32,
        max: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Clip::new(min, max)?;
        self.add_node_to_list(node.into(), name, &[parent])
    }

    pub fn new_log_node(&mut self, parent: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_node_to_list(Log.into(), name, &[parent])
    }

    pub fn new_sigmoid_node(&mut self, parent: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_node_to_list(Sigmoid.into(), name, &[parent])
    }

    pub fn new_leaky_relu_node(
        &mut self,
        parent: NodeId,
        negative_slope: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = LeakyReLU::new(negative_slope)?;
        self.add_node_to_list(node.into(), name, &[parent])
    }

    /// 创建 Dropout 节点
    ///
    /// `rate == 0`时不创建任何节点，直接返回`parent`（与不加 Dropout 完全等价）；
    /// `rate`不在`[0, 1)`内时返回`GraphError::InvalidConfig`。
    pub fn new_dropout_node(
        &mut self,
        parent: NodeId,
        rate: f32,
        policy: MaskPolicy,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        if rate == 0.0 {
            self.get_node(parent)?;
            return Ok(parent);
        }
        let node = Dropout::new(rate, policy)?;
        self.add_node_to_list(node.into(), name, &[parent])
    }

    /// 创建求和节点（输出形状为`[1]`）
    pub fn new_sum_node(&mut self, parent: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_node_to_list(Sum.into(), name, &[parent])
    }
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑一元算子↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓多元算子↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    pub fn new_add_node(&mut self, a: NodeId, b: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.add_node_to_list(Add.into(), name, &[a, b])
    }

    pub fn new_multiply_node(
        &mut self,
        a: NodeId,
        b: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.add_node_to_list(Multiply.into(), name, &[a, b])
    }

    pub fn new_mat_mul_node(
        &mut self,
        a: NodeId,
        b: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.add_node_to_list(MatMul.into(), name, &[a, b])
    }

    /// 创建拼接节点，沿`axis`依次拼接`parents`
    pub fn new_concatenate_node(
        &mut self,
        parents: &[NodeId],
        axis: usize,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        if parents.is_empty() {
            return Err(GraphError::InvalidOperation(
                "Concatenate节点至少需要1个父节点".to_string(),
            ));
        }
        self.add_node_to_list(Concatenate::new(axis).into(), name, parents)
    }
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑多元算子↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
}
