/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : 由多个子模型组合而成的复合模型
 */

mod adversarial;
mod config;

pub use adversarial::AdversarialNet;
pub use config::AdversarialConfig;
