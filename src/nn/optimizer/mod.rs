/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-01-17
 * @Description  : 优化器模块：消费计算图已算好的梯度，按参数组更新参数
 */

mod base;
mod sgd;

pub use base::{Optimizer, ParamGroup};
pub use sgd::SGD;
