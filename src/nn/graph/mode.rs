/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : Graph train/test 阶段
 */

use super::Graph;
use crate::nn::Phase;

impl Graph {
    /// 设置整张图的运行阶段，下一次前向传播起对所有节点生效
    pub fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("图{}的运行阶段切换为{}", self.name, phase);
        }
        self.phase = phase;
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_train_phase(&self) -> bool {
        self.phase == Phase::Train
    }

    /// 在指定阶段下执行`f`，结束后恢复原阶段
    pub fn with_phase<F, R>(&mut self, phase: Phase, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        let previous = self.phase;
        self.set_phase(phase);
        let result = f(self);
        self.set_phase(previous);
        result
    }
}
