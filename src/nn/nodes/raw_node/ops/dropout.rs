/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : Dropout 节点（含按通道共享掩码的 spatial 变体）
 */

use super::unary_setup;
use crate::nn::nodes::raw_node::{PassContext, TraitNode};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 掩码形状策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskPolicy {
    /// 掩码与输出同形状，每个元素独立采样
    #[default]
    Elementwise,
    /// 掩码只在前两维（样本、通道）上变化，在其余（空间）维度上广播，
    /// 即同一通道内的所有位置共享一个掩码值
    Spatial,
}

/// Dropout 节点
///
/// - 训练阶段：每次前向传播重新采样掩码，元素以`1 - rate`的概率保留（掩码为1），
///   输出 = 输入 ⊙ 掩码；
/// - 测试阶段：不采样，输出 = 输入 × (1 - rate)；
/// - 反向传播：输入梯度 = 输出梯度 ⊙ 掩码，使用的正是最近一次前向传播采样的掩码。
///   测试阶段不定义反向传播，调用将返回错误。
///
/// `rate == 0`时本节点什么也不做，由`Graph::new_dropout_node`直接返回父节点，不会构造本节点。
#[derive(Clone)]
pub(in crate::nn) struct Dropout {
    rate: f32,
    policy: MaskPolicy,
    mask: Tensor,
}

impl Dropout {
    pub(in crate::nn) fn new(rate: f32, policy: MaskPolicy) -> Result<Self, GraphError> {
        if !(rate > 0.0 && rate < 1.0) {
            return Err(GraphError::InvalidConfig(format!(
                "Dropout节点的rate须在(0, 1)内，但得到{rate}"
            )));
        }
        Ok(Self {
            rate,
            policy,
            mask: Tensor::zeros(&[0]),
        })
    }

    /// 根据掩码策略由输出形状得出掩码形状
    fn mask_shape(&self, shape: &[usize]) -> Result<Vec<usize>, GraphError> {
        match self.policy {
            MaskPolicy::Elementwise => Ok(shape.to_vec()),
            MaskPolicy::Spatial => {
                if shape.len() < 2 {
                    return Err(GraphError::DimensionMismatch {
                        expected: 2,
                        got: shape.len(),
                        message: "Spatial Dropout的输入至少需要2维（样本、通道）".to_string(),
                    });
                }
                let mut mask_shape = shape[..2].to_vec();
                mask_shape.resize(shape.len(), 1);
                Ok(mask_shape)
            }
        }
    }
}

impl TraitNode for Dropout {
    fn type_name(&self) -> &'static str {
        "dropout"
    }

    fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
        let shape = unary_setup(self.type_name(), parent_shapes)?;
        self.mask = Tensor::zeros(&self.mask_shape(&shape)?);
        Ok(shape)
    }

    fn fprop(
        &mut self,
        parents: &[&Tensor],
        value: &mut Tensor,
        ctx: &mut PassContext,
    ) -> Result<(), GraphError> {
        match ctx.phase {
            Phase::Train => {
                self.mask.sample_keep_mask_(self.rate, ctx.rng);
                value.zip_from(parents[0], &self.mask, |x, m| x * m);
            }
            Phase::Test => {
                let scale = 1.0 - self.rate;
                value.map_from(parents[0], |x| x * scale);
            }
        }
        Ok(())
    }

    fn bprop(
        &self,
        _parents: &[&Tensor],
        _value: &Tensor,
        grad: &Tensor,
        phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        if phase == Phase::Test {
            return Err(GraphError::InvalidOperation(
                "Dropout节点在test阶段不支持反向传播".to_string(),
            ));
        }
        let mut input_grad = Tensor::zeros(grad.shape());
        input_grad.zip_from(grad, &self.mask, |g, m| g * m);
        Ok(vec![input_grad])
    }
}
