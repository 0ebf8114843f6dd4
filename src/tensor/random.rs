/*
 * @Author       : 老董
 * @Description  : 随机张量：构造函数（分配新张量）与原地重采样（复用已分配的缓冲区）。
 *                 随机数生成器由调用方传入，本模块不持有任何随机状态。
 */

use super::Tensor;
use ndarray::{ArrayD, IxDyn};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::{Distribution, StandardNormal, Uniform};
use rand::Rng;

impl Tensor {
    /// 创建一个随机张量，其值服从`[low, high)`上的均匀分布
    pub fn uniform<R: Rng + ?Sized>(low: f32, high: f32, shape: &[usize], rng: &mut R) -> Tensor {
        Tensor {
            data: ArrayD::random_using(IxDyn(shape), Uniform::new(low, high), rng),
        }
    }

    /// 创建一个服从正态分布 N(mean, std_dev²) 的随机张量
    pub fn normal<R: Rng + ?Sized>(mean: f32, std_dev: f32, shape: &[usize], rng: &mut R) -> Tensor {
        let standard: ArrayD<f32> = ArrayD::random_using(IxDyn(shape), StandardNormal, rng);
        Tensor {
            data: standard.mapv_into(|z| mean + std_dev * z),
        }
    }

    /// 原地重采样为`[low, high)`上的均匀分布
    pub fn sample_uniform_<R: Rng + ?Sized>(&mut self, low: f32, high: f32, rng: &mut R) {
        let distribution = Uniform::new(low, high);
        self.data.mapv_inplace(|_| distribution.sample(rng));
    }

    /// 原地重采样为正态分布 N(mean, std_dev²)
    pub fn sample_normal_<R: Rng + ?Sized>(&mut self, mean: f32, std_dev: f32, rng: &mut R) {
        self.data.mapv_inplace(|_| {
            let z: f32 = StandardNormal.sample(rng);
            mean + std_dev * z
        });
    }

    /// 原地生成保留掩码：每个元素独立采样`u ~ U[0, 1)`，
    /// 当`rate < u`时取 1（保留），否则取 0（丢弃），即保留的概率为`1 - rate`
    pub fn sample_keep_mask_<R: Rng + ?Sized>(&mut self, rate: f32, rng: &mut R) {
        let distribution = Uniform::new(0.0f32, 1.0);
        self.data.mapv_inplace(|_| {
            if rate < distribution.sample(rng) {
                1.0
            } else {
                0.0
            }
        });
    }
}
