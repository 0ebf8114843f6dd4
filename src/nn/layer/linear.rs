/*
 * @Author       : 老董
 * @Date         : 2026-01-17
 * @Description  : Linear (全连接) 层
 */

use crate::nn::{Graph, GraphError, Module, NodeId, Parameter};
use rand::Rng;

/// 全连接层之后的激活函数
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Activation {
    /// 不加激活（恒等）
    #[default]
    Identity,
    Sigmoid,
    LeakyReLU(f32),
}

/// Linear (全连接) 层
///
/// `output = activation(x @ W + b)`
///
/// # 输入/输出形状
/// - 输入：[batch_size, in_features]
/// - 输出：[batch_size, out_features]
///
/// # 使用示例
/// ```ignore
/// let fc = Linear::new(784, 128, Activation::LeakyReLU(0.2), "fc1", &mut rng);
/// let h = fc.forward(&mut graph, x)?;
/// ```
pub struct Linear {
    /// 权重参数 [in_features, out_features]
    weights: Parameter,
    /// 偏置参数 [1, out_features]
    bias: Parameter,
    activation: Activation,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// 创建新的 Linear 层
    ///
    /// 权重从 U(-1/√in, 1/√in) 中采样，偏置初始化为 0
    pub fn new<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        activation: Activation,
        name: &str,
        rng: &mut R,
    ) -> Self {
        let scale = 1.0 / (in_features.max(1) as f32).sqrt();
        Self {
            weights: Parameter::uniform(
                &format!("{name}_W"),
                &[in_features, out_features],
                scale,
                rng,
            ),
            bias: Parameter::zeros(&format!("{name}_b"), &[1, out_features]),
            activation,
            in_features,
            out_features,
        }
    }

    pub const fn weights(&self) -> &Parameter {
        &self.weights
    }

    pub const fn bias(&self) -> &Parameter {
        &self.bias
    }

    pub const fn in_features(&self) -> usize {
        self.in_features
    }

    pub const fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    fn parameters(&self) -> Vec<Parameter> {
        vec![self.weights.clone(), self.bias.clone()]
    }

    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, GraphError> {
        let weights = graph.new_parameter_node(&self.weights, None)?;
        let bias = graph.new_parameter_node(&self.bias, None)?;
        let xw = graph.new_mat_mul_node(input, weights, None)?;
        let output = graph.new_add_node(xw, bias, None)?;
        match self.activation {
            Activation::Identity => Ok(output),
            Activation::Sigmoid => graph.new_sigmoid_node(output, None),
            Activation::LeakyReLU(slope) => graph.new_leaky_relu_node(output, slope, None),
        }
    }
}
