/*
 * @Author       : 老董
 * @Date         : 2024-01-31 20:23:53
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-03
 * @Description  : 负责计算图（expression graph）的构建、执行与求导
 */

mod graph;
pub mod layer;
pub mod model;
mod module;
mod nodes;
pub mod optimizer;
mod parameter;
mod phase;

pub use graph::{Graph, GraphError};
pub use layer::{Activation, Linear};
pub use model::{AdversarialConfig, AdversarialNet};
pub use module::Module;
pub use nodes::{MaskPolicy, NodeId};
pub use optimizer::{Optimizer, ParamGroup, SGD};
pub use parameter::Parameter;
pub use phase::Phase;

#[cfg(test)]
mod tests;
