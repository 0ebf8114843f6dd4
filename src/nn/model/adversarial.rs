/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 对抗网络（GAN）：生成器与判别器通过梯度反转节点和拼接节点接入同一张训练图，
 *                 一次前向 + 一次反向即可同时得到两者的梯度
 */

use super::AdversarialConfig;
use crate::nn::optimizer::ParamGroup;
use crate::nn::{Graph, GraphError, Module, NodeId, Phase};
use crate::tensor::Tensor;
use std::collections::HashMap;

/// 训练图及其中需要从外部访问的节点
struct TrainingGraph {
    graph: Graph,
    x_src: NodeId,
    /// 逐样本的对数似然，形状为`[2 * batch_size, 1]`
    loss: NodeId,
    batch_size: usize,
}

/// 只包含生成器的生成图
struct GenerationGraph {
    graph: Graph,
    z_src: NodeId,
    output: NodeId,
}

/// 对抗网络
///
/// 训练图的结构：
/// ```text
/// x_src ─────────────────────────────────┐
///                                        ├─ concat(axis=0) → D → clip(eps, 1-eps) → ⊙sign + offset → log → sum → neg
/// z ~ N(0, 1) → G → negative_gradient ───┘
/// ```
/// 前一半样本为真实数据（sign = 1，offset = 0），后一半为生成数据（sign = -1，offset = 1），
/// 于是 log 的参数分别为 D(x) 和 1 - D(G(z))。目标是二者对数之和取负，
/// 判别器沿梯度下降即最大化对数似然；生成器的梯度经过梯度反转节点后符号相反，方向正好相反。
pub struct AdversarialNet<G: Module, D: Module> {
    generator: G,
    discriminator: D,
    config: AdversarialConfig,
    seed: Option<u64>,
    training: Option<TrainingGraph>,
    /// 按批大小缓存的生成图
    generation: HashMap<usize, GenerationGraph>,
}

impl<G: Module, D: Module> AdversarialNet<G, D> {
    pub fn new(generator: G, discriminator: D, config: AdversarialConfig) -> Result<Self, GraphError> {
        config.validate()?;
        Ok(Self {
            generator,
            discriminator,
            config,
            seed: None,
            training: None,
            generation: HashMap::new(),
        })
    }

    /// 固定内部各图的随机种子（噪声与 Dropout 掩码可重复）
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn generator(&self) -> &G {
        &self.generator
    }

    pub const fn discriminator(&self) -> &D {
        &self.discriminator
    }

    pub const fn config(&self) -> &AdversarialConfig {
        &self.config
    }

    fn new_graph(&self, name: &str) -> Graph {
        match self.seed {
            Some(seed) => Graph::with_name_and_seed(name, seed),
            None => Graph::with_name(name),
        }
    }

    /// 按真实数据批次的形状`x_shape`（第0维为批大小）搭建并 setup 训练图
    pub fn setup(&mut self, x_shape: &[usize]) -> Result<(), GraphError> {
        let batch_size = match x_shape.first() {
            Some(&batch_size) if batch_size > 0 => batch_size,
            _ => {
                return Err(GraphError::InvalidConfig(format!(
                    "训练数据的形状{x_shape:?}须至少1维且批大小大于0"
                )));
            }
        };
        let mut graph = self.new_graph("adversarial_training");

        let x_src = graph.new_source_node(x_shape, Some("x_src"))?;
        let z = graph.new_random_normal_node(&[batch_size, self.config.n_hidden], 0.0, 1.0, Some("z"))?;
        let x_tilde = self.generator.forward(&mut graph, z)?;
        let x_tilde = graph.new_negative_gradient_node(x_tilde, None)?;
        let x = graph.new_concatenate_node(&[x_src, x_tilde], 0, None)?;
        let d = self.discriminator.forward(&mut graph, x)?;
        let eps = self.config.eps;
        let d = graph.new_clip_node(d, eps, 1.0 - eps, None)?;

        let (sign, offset) = target_sign_and_offset(batch_size);
        let sign = graph.new_constant_node(&sign, Some("sign"))?;
        let offset = graph.new_constant_node(&offset, Some("offset"))?;
        let signed = graph.new_multiply_node(d, sign, None)?;
        let shifted = graph.new_add_node(signed, offset, None)?;
        let loss = graph.new_log_node(shifted, Some("loss"))?;
        let total = graph.new_sum_node(loss, None)?;
        let objective = graph.new_negative_node(total, Some("objective"))?;

        graph.setup(&[objective])?;
        // 判别器须对每个样本输出一个概率
        let d_shape = graph.get_node_shape(d)?.unwrap_or(&[]);
        if d_shape != [2 * batch_size, 1] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![2 * batch_size, 1],
                got: d_shape.to_vec(),
                message: "判别器的输出形状须为[样本数, 1]".to_string(),
            });
        }
        graph.set_out_grad(objective, &Tensor::ones(&[1]))?;

        log::debug!(
            "对抗网络训练图setup完成：数据形状{:?}，噪声维度{}，共{}个节点",
            x_shape,
            self.config.n_hidden,
            graph.nodes_count()
        );
        self.training = Some(TrainingGraph {
            graph,
            x_src,
            loss,
            batch_size,
        });
        Ok(())
    }

    fn training_mut(&mut self) -> Result<&mut TrainingGraph, GraphError> {
        self.training.as_mut().ok_or_else(|| {
            GraphError::InvalidOperation("对抗网络尚未setup，请先调用setup".to_string())
        })
    }

    /// 用一批真实数据执行一次前向 + 反向传播，梯度写入生成器与判别器的参数
    ///
    /// 返回`(d_x_loss, d_z_loss)`：真实样本和生成样本两半各自的负对数似然均值，仅供观察
    pub fn update(&mut self, x: &Tensor) -> Result<(f32, f32), GraphError> {
        let training = self.training_mut()?;
        training.graph.set_node_value(training.x_src, x)?;
        training.graph.fprop()?;
        training.graph.bprop()?;

        let loss = training
            .graph
            .get_node_value(training.loss)?
            .ok_or_else(|| GraphError::ComputationError("loss节点没有值".to_string()))?;
        let gan_loss = -loss;
        let batch_size = training.batch_size;
        let d_x_loss = gan_loss.slice_axis(0, 0, batch_size).mean();
        let d_z_loss = gan_loss.slice_axis(0, batch_size, 2 * batch_size).mean();
        log::trace!("d_x_loss={d_x_loss}，d_z_loss={d_z_loss}");
        Ok((d_x_loss, d_z_loss))
    }

    /// 由噪声`hidden`（形状`[n_samples, n_hidden]`）生成样本
    ///
    /// 生成图只含生成器，与训练图共享生成器参数，始终处于 test 阶段。
    /// 按`config.batch_size`分批送入，最后一批不足时补零，结果截断为`n_samples`行。
    pub fn generate(&mut self, hidden: &Tensor) -> Result<Tensor, GraphError> {
        let n_hidden = self.config.n_hidden;
        if hidden.dimension() != 2 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: hidden.dimension(),
                message: "generate的输入须为[n_samples, n_hidden]的矩阵".to_string(),
            });
        }
        let n_samples = hidden.shape()[0];
        if hidden.shape()[1] != n_hidden || n_samples == 0 {
            return Err(GraphError::ShapeMismatch {
                expected: vec![n_samples.max(1), n_hidden],
                got: hidden.shape().to_vec(),
                message: "generate的输入须为非空的[n_samples, n_hidden]矩阵".to_string(),
            });
        }
        let batch_size = self.config.batch_size.min(n_samples);

        if !self.generation.contains_key(&batch_size) {
            let generation = self.build_generation_graph(batch_size)?;
            self.generation.insert(batch_size, generation);
        }
        let generation = self.generation.get_mut(&batch_size).ok_or_else(|| {
            GraphError::ComputationError(format!("批大小为{batch_size}的生成图不存在"))
        })?;

        let mut samples = Vec::new();
        let mut start = 0;
        while start < n_samples {
            let end = (start + batch_size).min(n_samples);
            let mut z_batch = hidden.slice_axis(0, start, end);
            if end - start < batch_size {
                let padding = Tensor::zeros(&[batch_size - (end - start), n_hidden]);
                z_batch = Tensor::concat(0, &[&z_batch, &padding]);
            }
            generation.graph.set_node_value(generation.z_src, &z_batch)?;
            generation.graph.fprop()?;
            let output = generation
                .graph
                .get_node_value(generation.output)?
                .ok_or_else(|| GraphError::ComputationError("生成器输出没有值".to_string()))?;
            samples.push(output.slice_axis(0, 0, end - start));
            start = end;
        }

        let sample_refs: Vec<&Tensor> = samples.iter().collect();
        Ok(Tensor::concat(0, &sample_refs))
    }

    fn build_generation_graph(&self, batch_size: usize) -> Result<GenerationGraph, GraphError> {
        let mut graph = self.new_graph("adversarial_generation");
        let z_src = graph.new_source_node(&[batch_size, self.config.n_hidden], Some("z_src"))?;
        let output = self.generator.forward(&mut graph, z_src)?;
        graph.setup(&[output])?;
        graph.set_phase(Phase::Test);
        log::debug!("构建批大小为{batch_size}的生成图，共{}个节点", graph.nodes_count());
        Ok(GenerationGraph {
            graph,
            z_src,
            output,
        })
    }

    /// 按子模型分组的参数：`[生成器, 判别器]`
    pub fn parameters(&self) -> Vec<ParamGroup> {
        vec![
            ParamGroup::new("generator", self.generator.parameters()),
            ParamGroup::new("discriminator", self.discriminator.parameters()),
        ]
    }

    /// 设置训练图的运行阶段
    pub fn set_phase(&mut self, phase: Phase) -> Result<(), GraphError> {
        self.training_mut()?.graph.set_phase(phase);
        Ok(())
    }

    pub fn phase(&self) -> Option<Phase> {
        self.training.as_ref().map(|training| training.graph.phase())
    }
}

/// 前一半（真实样本）sign = 1、offset = 0；后一半（生成样本）sign = -1、offset = 1
fn target_sign_and_offset(batch_size: usize) -> (Tensor, Tensor) {
    let mut sign = vec![1.0; 2 * batch_size];
    let mut offset = vec![0.0; 2 * batch_size];
    sign[batch_size..].fill(-1.0);
    offset[batch_size..].fill(1.0);
    (
        Tensor::new(&sign, &[2 * batch_size, 1]),
        Tensor::new(&offset, &[2 * batch_size, 1]),
    )
}
