//! # Expr Graph
//!
//! `expr_graph`是一个用纯rust实现的计算图（expression graph）引擎：
//! 由可组合的表达式节点搭建可微模型，按拓扑顺序执行前向传播，按逆序执行反向传播并累加梯度。
//! 内置含训练/测试阶段的 Dropout 节点，以及通过梯度反转节点把生成器与判别器接入同一张图的对抗网络。
//!

pub mod errors;
pub mod nn;
pub mod tensor;
pub mod utils;
