/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @Description  : 梯度下降优化器实现
 */

use super::base::{Optimizer, ParamGroup};
use crate::nn::GraphError;

/// SGD (随机梯度下降) 优化器
pub struct SGD {
    learning_rate: f32,
}

impl SGD {
    /// 创建新的SGD优化器
    pub fn new(learning_rate: f32) -> Result<Self, GraphError> {
        check_learning_rate(learning_rate)?;
        Ok(Self { learning_rate })
    }
}

impl Optimizer for SGD {
    /// 对每个参数执行 θ = θ - α * ∇θ，α 优先取参数组自身的学习率
    fn step(&mut self, groups: &[ParamGroup]) -> Result<(), GraphError> {
        for group in groups {
            let learning_rate = group.learning_rate.unwrap_or(self.learning_rate);
            check_learning_rate(learning_rate)?;
            for param in &group.params {
                if !param.grad().all_finite() {
                    return Err(GraphError::ComputationError(format!(
                        "参数组{}中的参数{}的梯度含有非有限值",
                        group.name,
                        param.name()
                    )));
                }
                param.apply_gradient(learning_rate);
            }
        }
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.learning_rate = lr;
    }
}

fn check_learning_rate(learning_rate: f32) -> Result<(), GraphError> {
    if !(learning_rate > 0.0 && learning_rate.is_finite()) {
        return Err(GraphError::InvalidConfig(format!(
            "学习率须为正的有限值，但得到{learning_rate}"
        )));
    }
    Ok(())
}
