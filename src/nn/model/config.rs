/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 对抗网络的配置
 */

use crate::nn::GraphError;
use serde::{Deserialize, Serialize};

const fn default_eps() -> f32 {
    1e-4
}

const fn default_batch_size() -> usize {
    128
}

/// 对抗网络的配置
///
/// 可从 JSON 读取，缺省字段取默认值：
/// ```ignore
/// let config = AdversarialConfig::from_json_str(r#"{ "n_hidden": 16 }"#)?;
/// assert_eq!(config.batch_size, 128);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdversarialConfig {
    /// 生成器输入噪声的维度
    pub n_hidden: usize,
    /// 判别器输出被截断到`[eps, 1 - eps]`后再取对数
    #[serde(default = "default_eps")]
    pub eps: f32,
    /// `generate`时每批送入生成器的样本数
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl AdversarialConfig {
    pub const fn new(n_hidden: usize) -> Self {
        Self {
            n_hidden,
            eps: default_eps(),
            batch_size: default_batch_size(),
        }
    }

    pub const fn with_eps(mut self, eps: f32) -> Self {
        self.eps = eps;
        self
    }

    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// 从 JSON 字符串解析并校验配置
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GraphError::InvalidConfig(format!("无法解析对抗网络配置：{e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        if self.n_hidden == 0 {
            return Err(GraphError::InvalidConfig("n_hidden须大于0".to_string()));
        }
        if self.batch_size == 0 {
            return Err(GraphError::InvalidConfig("batch_size须大于0".to_string()));
        }
        if !(self.eps > 0.0 && self.eps < 0.5) {
            return Err(GraphError::InvalidConfig(format!(
                "eps须在(0, 0.5)内，但得到{}",
                self.eps
            )));
        }
        Ok(())
    }
}
