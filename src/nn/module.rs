/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @Description  : Module trait 定义
 */

use super::{Graph, GraphError, NodeId, Parameter};

/// 模块 trait：一组可训练参数加上把它们接入计算图的方式
///
/// 同一个模块实例可以多次调用`forward`，接入不同的图（如训练图和生成图），
/// 各图中的参数节点共享同一组`Parameter`。
///
/// # 使用示例
///
/// ```ignore
/// struct Mlp {
///     hidden: Linear,
///     output: Linear,
/// }
///
/// impl Module for Mlp {
///     fn parameters(&self) -> Vec<Parameter> {
///         [self.hidden.parameters(), self.output.parameters()].concat()
///     }
///
///     fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, GraphError> {
///         let h = self.hidden.forward(graph, input)?;
///         self.output.forward(graph, h)
///     }
/// }
/// ```
pub trait Module {
    /// 获取所有可训练参数
    fn parameters(&self) -> Vec<Parameter>;

    /// 以`input`为输入，把本模块的子图接入`graph`，返回输出节点
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, GraphError>;

    /// 获取参数数量
    fn num_params(&self) -> usize {
        self.parameters().len()
    }
}
