/*
 * @Author       : 老董
 * @Description  : toy_gan 示例的生成器与判别器
 */

use expr_graph::nn::{Activation, Graph, GraphError, Linear, MaskPolicy, Module, NodeId, Parameter};
use rand::rngs::StdRng;

/// 噪声维度
pub const LATENT_DIM: usize = 4;
/// 数据维度（二维平面上的点）
pub const DATA_DIM: usize = 2;
const HIDDEN_DIM: usize = 16;

/// Generator: z(4) -> FC(16, LeakyReLU) -> FC(2)
pub struct Generator {
    fc1: Linear,
    fc2: Linear,
}

impl Generator {
    pub fn new(rng: &mut StdRng) -> Self {
        Self {
            fc1: Linear::new(LATENT_DIM, HIDDEN_DIM, Activation::LeakyReLU(0.2), "g_fc1", rng),
            fc2: Linear::new(HIDDEN_DIM, DATA_DIM, Activation::Identity, "g_fc2", rng),
        }
    }
}

impl Module for Generator {
    fn parameters(&self) -> Vec<Parameter> {
        [self.fc1.parameters(), self.fc2.parameters()].concat()
    }

    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, GraphError> {
        let h = self.fc1.forward(graph, input)?;
        self.fc2.forward(graph, h)
    }
}

/// Discriminator: x(2) -> FC(16, LeakyReLU) -> Dropout -> FC(1, Sigmoid)
pub struct Discriminator {
    fc1: Linear,
    fc2: Linear,
    dropout_rate: f32,
}

impl Discriminator {
    pub fn new(dropout_rate: f32, rng: &mut StdRng) -> Self {
        Self {
            fc1: Linear::new(DATA_DIM, HIDDEN_DIM, Activation::LeakyReLU(0.2), "d_fc1", rng),
            fc2: Linear::new(HIDDEN_DIM, 1, Activation::Sigmoid, "d_fc2", rng),
            dropout_rate,
        }
    }
}

impl Module for Discriminator {
    fn parameters(&self) -> Vec<Parameter> {
        [self.fc1.parameters(), self.fc2.parameters()].concat()
    }

    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, GraphError> {
        let h = self.fc1.forward(graph, input)?;
        let h = graph.new_dropout_node(h, self.dropout_rate, MaskPolicy::Elementwise, None)?;
        self.fc2.forward(graph, h)
    }
}
