/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : 节点实现：统一的节点契约（TraitNode）与各类节点
 *
 * 每个节点只负责三件事：
 * - setup：由父节点的形状推导输出形状，并分配内部状态（如 Dropout 的掩码）
 * - fprop：读取父节点的输出，原地写入本节点的输出
 * - bprop：由本节点的输出梯度，计算对每个父节点的梯度贡献
 * 输出/梯度缓冲区的分配与梯度累加都由计算图负责。
 */

mod constant;
mod ops;
mod parameter;
mod random_normal;
mod source;

pub(in crate::nn) use constant::Constant;
pub use ops::MaskPolicy;
pub(in crate::nn) use ops::*;
pub(in crate::nn) use parameter::ParameterNode;
pub(in crate::nn) use random_normal::RandomNormal;
pub(in crate::nn) use source::Source;

use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;
use rand::rngs::StdRng;

#[enum_dispatch]
#[derive(Clone)]
pub(in crate::nn) enum NodeType {
    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓无父节点↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    Source(Source),
    Constant(Constant),
    RandomNormal(RandomNormal),
    ParameterNode(ParameterNode),
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑无父节点↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓算子↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    Negative(Negative),
    NegativeGradient(NegativeGradient),
    Clip(Clip),
    Log(Log),
    Sigmoid(Sigmoid),
    LeakyReLU(LeakyReLU),
    Dropout(Dropout),
    Add(Add),
    Multiply(Multiply),
    MatMul(MatMul),
    Sum(Sum),
    Concatenate(Concatenate),
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑算子↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
}

/// 单次前向传播中由图传给每个节点的上下文
pub(in crate::nn) struct PassContext<'a> {
    pub(in crate::nn) phase: Phase,
    pub(in crate::nn) rng: &'a mut StdRng,
}

#[enum_dispatch(NodeType)]
pub(in crate::nn) trait TraitNode {
    /// 节点类型名，也用作自动生成节点名的前缀
    fn type_name(&self) -> &'static str;

    /// 由父节点的输出形状推导本节点的输出形状，并分配内部状态。
    /// 父节点数量或形状不合法时返回错误
    fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError>;

    /// 根据父节点的值原地计算本节点的值（`value`已按 setup 的形状分配好）
    fn fprop(
        &mut self,
        parents: &[&Tensor],
        value: &mut Tensor,
        ctx: &mut PassContext,
    ) -> Result<(), GraphError>;

    /// 给定本节点的输出梯度`grad`，返回对每个父节点的梯度贡献（与父节点一一对应，形状与之相同）。
    /// 累加由图负责，节点自身不持有父节点的梯度
    fn bprop(
        &self,
        parents: &[&Tensor],
        value: &Tensor,
        grad: &Tensor,
        phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError>;
}

/// 检查父节点数量
pub(in crate::nn::nodes) fn check_parent_count(
    type_name: &str,
    parent_shapes: &[&[usize]],
    expected: usize,
) -> Result<(), GraphError> {
    if parent_shapes.len() != expected {
        return Err(GraphError::InvalidOperation(format!(
            "{}节点需要{}个父节点，但得到{}个",
            type_name,
            expected,
            parent_shapes.len()
        )));
    }
    Ok(())
}
