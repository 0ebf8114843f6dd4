/*
 * @Author       : 老董
 * @Date         : 2025-12-22
 * @Description  : Layer 模块 - 组合 Node 构建常见网络结构，用于搭建小型生成器/判别器
 */

mod linear;

pub use linear::{Activation, Linear};
