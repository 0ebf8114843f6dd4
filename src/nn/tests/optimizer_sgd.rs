/*
 * @Author       : 老董
 * @Description  : SGD 优化器单元测试
 */

use super::assert_tensor_close;
use crate::assert_err;
use crate::nn::{Graph, GraphError, Optimizer, ParamGroup, Parameter, SGD};
use crate::tensor::Tensor;

/// 以`sum(w)`为目标做一次前向 + 反向，使 w 的梯度为全 1
fn backprop_sum(params: &[&Parameter]) {
    let mut graph = Graph::new();
    let mut roots = Vec::new();
    for param in params {
        let node = graph.new_parameter_node(param, None).unwrap();
        let s = graph.new_sum_node(node, None).unwrap();
        roots.push(s);
    }
    graph.setup(&roots).unwrap();
    for &root in &roots {
        graph.set_out_grad(root, &Tensor::ones(&[1])).unwrap();
    }
    graph.fprop().unwrap();
    graph.bprop().unwrap();
}

#[test]
fn test_sgd_step() {
    let w = Parameter::new("w", Tensor::new(&[1., 2.], &[2]));
    backprop_sum(&[&w]);
    assert_eq!(*w.grad(), Tensor::ones(&[2]));

    let mut sgd = SGD::new(0.5).unwrap();
    sgd.step(&[ParamGroup::new("model", vec![w.clone()])]).unwrap();
    assert_tensor_close(&w.value(), &Tensor::new(&[0.5, 1.5], &[2]));
}

#[test]
fn test_sgd_group_learning_rate() {
    let g = Parameter::new("g", Tensor::zeros(&[2]));
    let d = Parameter::new("d", Tensor::zeros(&[2]));
    backprop_sum(&[&g, &d]);

    let mut sgd = SGD::new(1.0).unwrap();
    let groups = [
        ParamGroup::new("generator", vec![g.clone()]).with_learning_rate(0.1),
        ParamGroup::new("discriminator", vec![d.clone()]),
    ];
    sgd.step(&groups).unwrap();
    assert_tensor_close(&g.value(), &Tensor::full(-0.1, &[2]));
    assert_tensor_close(&d.value(), &Tensor::full(-1.0, &[2]));
}

#[test]
fn test_sgd_learning_rate_accessors() {
    let mut sgd = SGD::new(0.01).unwrap();
    assert_eq!(sgd.learning_rate(), 0.01);
    sgd.set_learning_rate(0.001);
    assert_eq!(sgd.learning_rate(), 0.001);
}

#[test]
fn test_sgd_invalid_learning_rate() {
    for lr in [0.0, -0.1, f32::NAN, f32::INFINITY] {
        assert_err!(SGD::new(lr).map(|_| ()), GraphError::InvalidConfig(_));
    }
    let w = Parameter::zeros("w", &[1]);
    let mut sgd = SGD::new(0.1).unwrap();
    let groups = [ParamGroup::new("model", vec![w]).with_learning_rate(-1.0)];
    assert_err!(sgd.step(&groups), GraphError::InvalidConfig(_));
}

#[test]
fn test_sgd_rejects_non_finite_grad() {
    let w = Parameter::new("w", Tensor::new(&[1., 2.], &[2]));
    w.accumulate_grad(&Tensor::new(&[f32::NAN, 0.], &[2]));
    let mut sgd = SGD::new(0.1).unwrap();
    let result = sgd.step(&[ParamGroup::new("model", vec![w.clone()])]);
    assert_err!(result, GraphError::ComputationError(msg) if msg.contains("w"));
    // 参数保持不变
    assert_eq!(*w.value(), Tensor::new(&[1., 2.], &[2]));
}
