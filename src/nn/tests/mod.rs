mod graph_basic;
mod node_concatenate;
mod optimizer_sgd;

use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

/// 逐元素比较两个张量（形状须严格一致）
fn assert_tensor_close(actual: &Tensor, expected: &Tensor) {
    assert_eq!(actual.shape(), expected.shape(), "形状不一致");
    for (a, e) in actual.to_vec().into_iter().zip(expected.to_vec()) {
        assert_abs_diff_eq!(a, e, epsilon = 1e-5);
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
