/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @Description  : 优化器基础trait和参数组
 */

use crate::nn::{GraphError, Parameter};

/// 参数组：一个子模型的全部参数，可带独立的学习率
///
/// 如 GAN 训练中生成器和判别器各为一组。
#[derive(Debug, Clone)]
pub struct ParamGroup {
    pub name: String,
    pub params: Vec<Parameter>,
    /// 为`None`时使用优化器自身的学习率
    pub learning_rate: Option<f32>,
}

impl ParamGroup {
    pub fn new(name: &str, params: Vec<Parameter>) -> Self {
        Self {
            name: name.to_string(),
            params,
            learning_rate: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = Some(learning_rate);
        self
    }
}

/// 优化器核心 trait
pub trait Optimizer {
    /// 参数更新（使用已计算的梯度）
    ///
    /// ```ignore
    /// let (d_x_loss, d_z_loss) = model.update(&batch)?; // 前向 + 反向
    /// optimizer.step(&model.parameters())?;             // 只更新参数
    /// ```
    fn step(&mut self, groups: &[ParamGroup]) -> Result<(), GraphError>;

    /// 获取学习率
    fn learning_rate(&self) -> f32;

    /// 设置学习率
    fn set_learning_rate(&mut self, lr: f32);
}
