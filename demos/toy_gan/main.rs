/*
 * 二维高斯分布上的 GAN 训练示例
 *
 * 真实数据是以 (2, -1) 为中心的二维高斯点云，生成器学习把标准正态噪声映射过去。
 *
 * # 运行
 * ```bash
 * RUST_LOG=info cargo run --example toy_gan
 * ```
 *
 * # 关键特性演示
 * 1. `AdversarialNet`: 一次`update`同时得到生成器与判别器的梯度（生成器一侧经梯度反转）
 * 2. 判别器中的 Dropout 只在训练图中生效，`generate`始终处于 test 阶段
 * 3. 配置从 JSON 读取，两组参数使用不同的学习率
 */

mod model;

use expr_graph::nn::{AdversarialConfig, AdversarialNet, GraphError, Optimizer, SGD};
use expr_graph::tensor::Tensor;
use model::{DATA_DIM, Discriminator, Generator, LATENT_DIM};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;

const CONFIG_JSON: &str = r#"{ "n_hidden": 4, "eps": 0.0001, "batch_size": 64 }"#;
const BATCH_SIZE: usize = 32;
const STEPS: usize = 2000;
const LR_D: f32 = 0.02;
const LR_G: f32 = 0.01;
const DATA_CENTER: [f32; 2] = [2.0, -1.0];
const DATA_STD: f32 = 0.5;

/// 采样一批真实数据
fn sample_real(rng: &mut StdRng) -> Tensor {
    let noise = Tensor::normal(0.0, DATA_STD, &[BATCH_SIZE, DATA_DIM], rng);
    noise + Tensor::new(&DATA_CENTER, &[1, DATA_DIM])
}

/// 各列均值
fn column_means(samples: &Tensor) -> Vec<f32> {
    (0..DATA_DIM)
        .map(|col| samples.slice_axis(1, col, col + 1).mean())
        .collect()
}

fn main() -> Result<(), GraphError> {
    env_logger::init();
    println!("=== 二维高斯 GAN 训练示例 ===\n");

    // 1. 创建模型
    println!("[1/3] 创建模型...");
    let config = AdversarialConfig::from_json_str(CONFIG_JSON)?;
    let mut rng = StdRng::seed_from_u64(42);
    let generator = Generator::new(&mut rng);
    let discriminator = Discriminator::new(0.2, &mut rng);
    let mut net = AdversarialNet::new(generator, discriminator, config)?.with_seed(42);
    net.setup(&[BATCH_SIZE, DATA_DIM])?;

    let mut groups = net.parameters();
    groups[0].learning_rate = Some(LR_G);
    groups[1].learning_rate = Some(LR_D);
    let mut optimizer = SGD::new(LR_D)?;
    println!("  Generator: {LATENT_DIM} -> 16 -> {DATA_DIM}");
    println!("  Discriminator: {DATA_DIM} -> 16 -> dropout(0.2) -> 1");
    println!("  学习率: D={LR_D}, G={LR_G}");

    // 2. 训练
    println!("\n[2/3] 开始训练...\n");
    let train_start = Instant::now();
    let (mut d_x_sum, mut d_z_sum) = (0.0, 0.0);
    for step in 1..=STEPS {
        let batch = sample_real(&mut rng);
        let (d_x_loss, d_z_loss) = net.update(&batch)?;
        optimizer.step(&groups)?;
        d_x_sum += d_x_loss;
        d_z_sum += d_z_loss;

        if step % 200 == 0 {
            println!(
                "step {step:4}: d_x_loss={:.4}, d_z_loss={:.4}",
                d_x_sum / 200.0,
                d_z_sum / 200.0
            );
            (d_x_sum, d_z_sum) = (0.0, 0.0);
        }
    }
    println!("\n  训练耗时 {:.2}s", train_start.elapsed().as_secs_f32());

    // 3. 生成
    println!("\n[3/3] 生成样本...");
    let hidden = Tensor::normal(0.0, 1.0, &[500, LATENT_DIM], &mut rng);
    let samples = net.generate(&hidden)?;
    let means = column_means(&samples);
    println!(
        "  生成样本均值: ({:.3}, {:.3})，真实分布中心: ({}, {})",
        means[0], means[1], DATA_CENTER[0], DATA_CENTER[1]
    );

    Ok(())
}
