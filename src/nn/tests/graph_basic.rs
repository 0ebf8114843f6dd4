/*
 * @Author       : 老董
 * @Description  : Graph 基础功能单元测试：节点创建、命名、Source 节点的读写
 */

use crate::assert_err;
use crate::nn::{Graph, GraphError, NodeId};
use crate::tensor::Tensor;

#[test]
fn test_node_name_generation() {
    let mut graph = Graph::new();
    let x = graph.new_source_node(&[2, 2], Some("x")).unwrap();

    // 1. 显式命名
    assert_eq!(graph.get_node_name(x).unwrap(), "x");

    // 2. 自动命名
    let neg1 = graph.new_negative_node(x, None).unwrap();
    let neg2 = graph.new_negative_node(x, None).unwrap();
    assert_eq!(graph.get_node_name(neg1).unwrap(), "negative_1");
    assert_eq!(graph.get_node_name(neg2).unwrap(), "negative_2");
    assert_eq!(graph.get_node_id("negative_2"), Some(neg2));
    assert_eq!(graph.get_node_type_name(neg2).unwrap(), "negative");

    // 3. 名称重复
    let result = graph.new_negative_node(x, Some("x"));
    assert_err!(
        result,
        GraphError::DuplicateNodeName("节点x在图default_graph中重复")
    );
    assert_eq!(graph.nodes_count(), 3);
}

#[test]
fn test_auto_name_skips_taken_names() {
    let mut graph = Graph::new();
    let x = graph.new_source_node(&[1], None).unwrap();
    assert_eq!(graph.get_node_name(x).unwrap(), "source_1");

    // 显式占用了自动命名的候选名称
    let taken = graph.new_negative_node(x, Some("negative_2")).unwrap();
    let neg1 = graph.new_negative_node(x, None).unwrap();
    let neg3 = graph.new_negative_node(x, None).unwrap();
    assert_eq!(graph.get_node_name(neg1).unwrap(), "negative_1");
    assert_eq!(graph.get_node_name(neg3).unwrap(), "negative_3");
    assert_eq!(graph.get_node_id("negative_2"), Some(taken));

    // 各类型的序号互不影响
    let sig = graph.new_sigmoid_node(neg3, None).unwrap();
    assert_eq!(graph.get_node_name(sig).unwrap(), "sigmoid_1");

    // 自动命名之后再显式使用同名仍然报错
    let result = graph.new_negative_node(x, Some("negative_3"));
    assert_err!(result, GraphError::DuplicateNodeName(_));
    assert_eq!(graph.get_node_id("missing"), None);
}

#[test]
fn test_many_unnamed_nodes() {
    let mut graph = Graph::new();
    let mut last = graph.new_source_node(&[1], Some("x")).unwrap();
    for _ in 0..20_000 {
        last = graph.new_negative_node(last, None).unwrap();
    }
    assert_eq!(graph.nodes_count(), 20_001);
    assert_eq!(graph.get_node_name(last).unwrap(), "negative_20000");
    assert_eq!(graph.get_node_id("negative_20000"), Some(last));
}

#[test]
fn test_node_ids_and_edges() {
    let mut graph = Graph::with_name("edges");
    let a = graph.new_source_node(&[3], Some("a")).unwrap();
    let b = graph.new_source_node(&[3], Some("b")).unwrap();
    let c = graph.new_add_node(a, b, Some("c")).unwrap();
    let d = graph.new_multiply_node(c, a, Some("d")).unwrap();

    // 第一个节点的 id 为 1
    assert_eq!(a, NodeId(1));
    assert_eq!(graph.nodes(), vec![a, b, c, d]);
    assert_eq!(graph.get_node_parents(c).unwrap(), vec![a, b]);
    assert_eq!(graph.get_node_parents(d).unwrap(), vec![c, a]);
    assert_eq!(graph.get_node_children(a).unwrap(), vec![c, d]);
    assert!(graph.get_node_children(d).unwrap().is_empty());
}

#[test]
fn test_parent_must_exist() {
    let mut graph = Graph::new();
    let result = graph.new_negative_node(NodeId(99), None);
    assert_err!(result, GraphError::NodeNotFound(NodeId(99)));
    assert_eq!(graph.nodes_count(), 0);

    let x = graph.new_source_node(&[2], None).unwrap();
    let result = graph.new_add_node(x, NodeId(42), None);
    assert_err!(result, GraphError::NodeNotFound(NodeId(42)));
}

#[test]
fn test_set_value_only_for_source() {
    let mut graph = Graph::new();
    let x = graph.new_source_node(&[2, 2], Some("x")).unwrap();
    let y = graph.new_negative_node(x, Some("y")).unwrap();

    // 1. 非 Source 节点不能手动设置值
    let result = graph.set_node_value(y, &Tensor::zeros(&[2, 2]));
    assert_err!(result, GraphError::InvalidOperation(_));

    // 2. 形状必须与声明的一致
    let result = graph.set_node_value(x, &Tensor::zeros(&[3]));
    assert_err!(
        result,
        GraphError::ShapeMismatch([2, 2], [3], "写入节点[id=1, name=x, type=source]的值形状不符")
    );

    // 3. setup 之前也可写入，setup 后保留
    let value = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    graph.set_node_value(x, &value).unwrap();
    graph.setup(&[y]).unwrap();
    assert_eq!(graph.get_node_value(x).unwrap(), Some(&value));
}

#[test]
fn test_fprop_requires_setup() {
    let mut graph = Graph::new();
    let x = graph.new_source_node(&[2], None).unwrap();
    let y = graph.new_negative_node(x, None).unwrap();
    assert!(!graph.is_setup());
    assert_err!(graph.fprop(), GraphError::InvalidOperation(_));

    graph.setup(&[y]).unwrap();
    assert!(graph.is_setup());
    graph.fprop().unwrap();

    // 添加节点后需要重新 setup
    let z = graph.new_negative_node(y, None).unwrap();
    assert!(!graph.is_setup());
    assert_err!(graph.fprop(), GraphError::InvalidOperation(msg) if msg.contains("setup"));
    graph.setup(&[z]).unwrap();
    graph.fprop().unwrap();
}

#[test]
fn test_set_source_shape_requires_resetup() {
    let mut graph = Graph::new();
    let x = graph.new_source_node(&[2, 3], Some("x")).unwrap();
    let s = graph.new_sum_node(x, None).unwrap();
    let y = graph.new_negative_node(x, None).unwrap();
    graph.setup(&[y]).unwrap();
    assert_eq!(graph.get_node_shape(y).unwrap(), Some(&[2, 3][..]));

    graph.set_source_shape(x, &[4, 3]).unwrap();
    assert!(!graph.is_setup());
    assert_eq!(graph.get_node_shape(x).unwrap(), None);
    assert_err!(graph.fprop(), GraphError::InvalidOperation(_));

    graph.setup(&[y]).unwrap();
    assert_eq!(graph.get_node_shape(y).unwrap(), Some(&[4, 3][..]));
    graph.set_node_value(x, &Tensor::ones(&[4, 3])).unwrap();
    graph.fprop().unwrap();
    assert_eq!(graph.get_node_value(y).unwrap(), Some(&Tensor::full(-1., &[4, 3])));

    // 非 Source 节点不能改变形状
    assert_err!(graph.set_source_shape(s, &[1]), GraphError::InvalidOperation(_));
}
