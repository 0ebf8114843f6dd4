/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : 节点句柄：节点实现（raw_node）加上由图统一管理的输出/梯度缓冲区
 */

use super::raw_node::{NodeType, PassContext, TraitNode};
use super::NodeId;
use crate::nn::{GraphError, Parameter, Phase};
use crate::tensor::Tensor;
use std::fmt;

/// 节点句柄
///
/// `shape`、`value`、`grad`都在`Graph::setup`时分配，此后形状不再变化；
/// 未参与当前 setup 的节点这三者都为`None`。
pub(in crate::nn) struct NodeHandle {
    id: NodeId,
    name: String,
    raw_node: NodeType,
    shape: Option<Vec<usize>>,
    value: Option<Tensor>,
    grad: Option<Tensor>,
}

impl NodeHandle {
    pub(in crate::nn) fn new<T: Into<NodeType>>(raw_node: T) -> Self {
        Self {
            id: NodeId(0),
            name: String::new(),
            raw_node: raw_node.into(),
            shape: None,
            value: None,
            grad: None,
        }
    }

    pub(in crate::nn) fn bind_id_and_name(&mut self, id: NodeId, name: &str) {
        self.id = id;
        self.name = name.to_string();
    }

    pub(in crate::nn) fn name(&self) -> &str {
        &self.name
    }

    pub(in crate::nn) fn type_name(&self) -> &'static str {
        self.raw_node.type_name()
    }

    pub(in crate::nn) const fn raw_node(&self) -> &NodeType {
        &self.raw_node
    }

    pub(in crate::nn) const fn raw_node_mut(&mut self) -> &mut NodeType {
        &mut self.raw_node
    }

    pub(in crate::nn) fn is_source(&self) -> bool {
        matches!(self.raw_node, NodeType::Source(_))
    }

    /// 若为参数节点，返回其引用的共享参数
    pub(in crate::nn) fn parameter(&self) -> Option<&Parameter> {
        match &self.raw_node {
            NodeType::ParameterNode(node) => Some(node.parameter()),
            _ => None,
        }
    }

    pub(in crate::nn) fn shape(&self) -> Option<&[usize]> {
        self.shape.as_deref()
    }

    pub(in crate::nn) fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    pub(in crate::nn) fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    /// 推导输出形状并分配缓冲区
    ///
    /// 已有输出且形状不变时保留其内容（Source 节点在重新 setup 后仍保持外部喂入的值）。
    pub(in crate::nn) fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<(), GraphError> {
        let shape = self.raw_node.setup(parent_shapes)?;
        let keep_value = matches!(&self.value, Some(value) if value.shape() == &shape[..]);
        if !keep_value {
            self.value = Some(Tensor::zeros(&shape));
        }
        self.grad = Some(Tensor::zeros(&shape));
        self.shape = Some(shape);
        Ok(())
    }

    /// 释放缓冲区（节点不再参与当前的图）
    pub(in crate::nn) fn release_buffers(&mut self) {
        self.shape = None;
        self.value = None;
        self.grad = None;
    }

    /// 写入外部提供的值，仅供 Source 节点使用（调用方已检查形状）
    pub(in crate::nn) fn set_value(&mut self, value: &Tensor) {
        match &mut self.value {
            Some(buffer) => buffer.assign(value),
            None => self.value = Some(value.clone()),
        }
    }

    pub(in crate::nn) fn fprop(
        &mut self,
        parents: &[&Tensor],
        ctx: &mut PassContext,
    ) -> Result<(), GraphError> {
        let value = self.value.as_mut().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "{}没有分配输出缓冲区。不该触及本错误，否则说明crate代码有问题",
                format_node_display(self.id, &self.name, self.raw_node.type_name())
            ))
        })?;
        self.raw_node.fprop(parents, value, ctx)
    }

    /// 计算本节点对各父节点的梯度贡献（顺序与父节点声明顺序一致）
    pub(in crate::nn) fn bprop(
        &self,
        parents: &[&Tensor],
        phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        match (&self.value, &self.grad) {
            (Some(value), Some(grad)) => self.raw_node.bprop(parents, value, grad, phase),
            _ => Err(GraphError::ComputationError(format!(
                "{}没有分配缓冲区。不该触及本错误，否则说明crate代码有问题",
                self
            ))),
        }
    }

    pub(in crate::nn) fn zero_grad(&mut self) {
        if let Some(grad) = &mut self.grad {
            grad.fill(0.0);
        }
    }

    /// 用外部给定的种子梯度覆盖本节点的梯度（反向传播的起点）
    pub(in crate::nn) fn seed_grad(&mut self, seed: &Tensor) -> Result<(), GraphError> {
        let node_display = self.to_string();
        let grad = self.grad.as_mut().ok_or_else(|| {
            GraphError::ComputationError(format!("{node_display}没有分配梯度缓冲区"))
        })?;
        if grad.shape() != seed.shape() {
            return Err(GraphError::ShapeMismatch {
                expected: grad.shape().to_vec(),
                got: seed.shape().to_vec(),
                message: format!("{node_display}的种子梯度形状与输出不一致"),
            });
        }
        grad.assign(seed);
        Ok(())
    }

    /// 把某个下游节点的梯度贡献累加进本节点的梯度
    pub(in crate::nn) fn accumulate_grad(&mut self, contribution: &Tensor) -> Result<(), GraphError> {
        let node_display = self.to_string();
        let grad = self.grad.as_mut().ok_or_else(|| {
            GraphError::ComputationError(format!("{node_display}没有分配梯度缓冲区"))
        })?;
        if grad.shape() != contribution.shape() {
            return Err(GraphError::ShapeMismatch {
                expected: grad.shape().to_vec(),
                got: contribution.shape().to_vec(),
                message: format!("下游节点传给{node_display}的梯度形状不符"),
            });
        }
        *grad += contribution;
        Ok(())
    }
}

/// 错误消息里节点的统一写法：`节点[id=.., name=.., type=..]`
fn format_node_display(id: NodeId, name: &str, type_name: &str) -> String {
    format!("节点[id={id}, name={name}, type={type_name}]")
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_node_display(
            self.id,
            &self.name,
            self.raw_node.type_name(),
        ))
    }
}
