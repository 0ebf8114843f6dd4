/*
 * @Author       : 老董
 * @Description  : 二维高斯 GAN 集成测试
 *                 验证：对抗网络在完整训练循环中的数值稳定性、梯度反转与生成图的参数共享
 */

use expr_graph::nn::{
    Activation, AdversarialConfig, AdversarialNet, Graph, GraphError, Linear, MaskPolicy, Module,
    NodeId, Optimizer, Parameter, Phase, SGD,
};
use expr_graph::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;

const LATENT_DIM: usize = 3;
const DATA_DIM: usize = 2;
const BATCH_SIZE: usize = 16;

struct Discriminator {
    fc1: Linear,
    fc2: Linear,
}

impl Module for Discriminator {
    fn parameters(&self) -> Vec<Parameter> {
        [self.fc1.parameters(), self.fc2.parameters()].concat()
    }

    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, GraphError> {
        let h = self.fc1.forward(graph, input)?;
        let h = graph.new_dropout_node(h, 0.25, MaskPolicy::Elementwise, Some("d_dropout"))?;
        self.fc2.forward(graph, h)
    }
}

fn sample_real(rng: &mut StdRng) -> Tensor {
    Tensor::normal(0.0, 0.3, &[BATCH_SIZE, DATA_DIM], rng) + Tensor::new(&[1.0, 1.0], &[1, DATA_DIM])
}

/// 二维高斯 GAN 集成测试
///
/// - Generator: z(3) -> FC(2)
/// - Discriminator: x(2) -> FC(8, LeakyReLU) -> Dropout(0.25) -> FC(1, Sigmoid)
#[test]
fn test_toy_gan() -> Result<(), GraphError> {
    let _ = env_logger::builder().is_test(true).try_init();

    // ========== 1. 构建网络 ==========
    let config = AdversarialConfig::from_json_str(r#"{ "n_hidden": 3, "batch_size": 10 }"#)?;
    let mut rng = StdRng::seed_from_u64(2024);
    let generator = Linear::new(LATENT_DIM, DATA_DIM, Activation::Identity, "g", &mut rng);
    let discriminator = Discriminator {
        fc1: Linear::new(DATA_DIM, 8, Activation::LeakyReLU(0.2), "d_fc1", &mut rng),
        fc2: Linear::new(8, 1, Activation::Sigmoid, "d_fc2", &mut rng),
    };
    let mut net = AdversarialNet::new(generator, discriminator, config)?.with_seed(7);
    net.setup(&[BATCH_SIZE, DATA_DIM])?;
    assert_eq!(net.phase(), Some(Phase::Train));

    let mut groups = net.parameters();
    groups[0].learning_rate = Some(0.01);
    let mut optimizer = SGD::new(0.05)?;

    // ========== 2. 训练 ==========
    let hidden = Tensor::normal(0.0, 1.0, &[25, LATENT_DIM], &mut rng);
    let initial_samples = net.generate(&hidden)?;
    for step in 0..200 {
        let (d_x_loss, d_z_loss) = net.update(&sample_real(&mut rng))?;
        assert!(
            d_x_loss.is_finite() && d_z_loss.is_finite(),
            "第{step}步损失不是有限值：{d_x_loss}, {d_z_loss}"
        );
        for group in &groups {
            for param in &group.params {
                assert!(param.grad().all_finite());
            }
        }
        optimizer.step(&groups)?;
    }

    // ========== 3. 生成 ==========
    // 25 个样本、批大小 10：分3批，最后一批补零后截断
    let samples = net.generate(&hidden)?;
    assert_eq!(samples.shape(), &[25, DATA_DIM]);
    assert!(samples.all_finite());
    // 生成图与训练图共享生成器参数
    assert_ne!(samples, initial_samples);
    // 判别器中的 Dropout 不影响生成；训练图阶段保持不变
    assert_eq!(net.generate(&hidden)?, samples);
    assert_eq!(net.phase(), Some(Phase::Train));
    Ok(())
}
