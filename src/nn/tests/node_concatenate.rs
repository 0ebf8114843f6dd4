/*
 * @Author       : 老董
 * @Description  : Concatenate 节点单元测试
 */

use crate::assert_err;
use crate::nn::{Graph, GraphError};
use crate::tensor::Tensor;

fn range(start: usize, len: usize, shape: &[usize]) -> Tensor {
    let data: Vec<f32> = (start..start + len).map(|v| v as f32).collect();
    Tensor::new(&data, shape)
}

#[test]
fn test_concatenate_axis_0() {
    let mut graph = Graph::new();
    let a = graph.new_source_node(&[2, 5], Some("a")).unwrap();
    let b = graph.new_source_node(&[3, 5], Some("b")).unwrap();
    let c = graph.new_concatenate_node(&[a, b], 0, Some("c")).unwrap();
    graph.setup(&[c]).unwrap();
    assert_eq!(graph.get_node_shape(c).unwrap(), Some(&[5, 5][..]));

    graph.set_node_value(a, &range(0, 10, &[2, 5])).unwrap();
    graph.set_node_value(b, &range(10, 15, &[3, 5])).unwrap();
    graph.fprop().unwrap();
    assert_eq!(graph.get_node_value(c).unwrap().unwrap(), &range(0, 25, &[5, 5]));

    // 输出梯度按行切回两个父节点
    graph.set_out_grad(c, &range(100, 25, &[5, 5])).unwrap();
    graph.bprop().unwrap();
    assert_eq!(graph.get_node_grad(a).unwrap().unwrap(), &range(100, 10, &[2, 5]));
    assert_eq!(graph.get_node_grad(b).unwrap().unwrap(), &range(110, 15, &[3, 5]));
}

#[test]
fn test_concatenate_axis_1() {
    let mut graph = Graph::new();
    let a = graph.new_source_node(&[2, 2], None).unwrap();
    let b = graph.new_source_node(&[2, 3], None).unwrap();
    let c = graph.new_concatenate_node(&[a, b], 1, None).unwrap();
    graph.setup(&[c]).unwrap();
    assert_eq!(graph.get_node_shape(c).unwrap(), Some(&[2, 5][..]));

    graph.set_node_value(a, &Tensor::new(&[1., 2., 3., 4.], &[2, 2])).unwrap();
    graph
        .set_node_value(b, &Tensor::new(&[5., 6., 7., 8., 9., 10.], &[2, 3]))
        .unwrap();
    graph.fprop().unwrap();
    assert_eq!(
        graph.get_node_value(c).unwrap().unwrap(),
        &Tensor::new(&[1., 2., 5., 6., 7., 3., 4., 8., 9., 10.], &[2, 5])
    );

    graph.set_out_grad(c, &range(0, 10, &[2, 5])).unwrap();
    graph.bprop().unwrap();
    assert_eq!(
        graph.get_node_grad(a).unwrap().unwrap(),
        &Tensor::new(&[0., 1., 5., 6.], &[2, 2])
    );
    assert_eq!(
        graph.get_node_grad(b).unwrap().unwrap(),
        &Tensor::new(&[2., 3., 4., 7., 8., 9.], &[2, 3])
    );
}

#[test]
fn test_concatenate_same_parent_twice() {
    let mut graph = Graph::new();
    let a = graph.new_source_node(&[1, 2], None).unwrap();
    let c = graph.new_concatenate_node(&[a, a, a], 0, None).unwrap();
    graph.setup(&[c]).unwrap();
    graph.set_node_value(a, &Tensor::new(&[1., 2.], &[1, 2])).unwrap();
    graph.fprop().unwrap();
    assert_eq!(graph.get_node_shape(c).unwrap(), Some(&[3, 2][..]));

    graph.set_out_grad(c, &range(0, 6, &[3, 2])).unwrap();
    graph.bprop().unwrap();
    // 三段梯度之和
    assert_eq!(
        graph.get_node_grad(a).unwrap().unwrap(),
        &Tensor::new(&[6., 9.], &[1, 2])
    );
}

#[test]
fn test_concatenate_errors() {
    let mut graph = Graph::new();
    let a = graph.new_source_node(&[2, 5], Some("a")).unwrap();
    let b = graph.new_source_node(&[3, 4], Some("b")).unwrap();
    let v = graph.new_source_node(&[5], Some("v")).unwrap();

    // 1. 没有父节点
    assert_err!(
        graph.new_concatenate_node(&[], 0, None),
        GraphError::InvalidOperation("Concatenate节点至少需要1个父节点")
    );

    // 2. 除拼接维外形状不一致
    let c = graph.new_concatenate_node(&[a, b], 0, None).unwrap();
    assert_err!(
        graph.setup(&[c]),
        GraphError::ShapeMismatch([2, 5], [3, 4], "Concatenate节点的各父节点除第0维外形状须一致")
    );

    // 3. 拼接维超出维数
    let c = graph.new_concatenate_node(&[a, a], 2, None).unwrap();
    assert_err!(graph.setup(&[c]), GraphError::DimensionMismatch(3, 2));

    // 4. 维数不一致
    let c = graph.new_concatenate_node(&[a, v], 0, None).unwrap();
    assert_err!(graph.setup(&[c]), GraphError::DimensionMismatch(2, 1));
}
