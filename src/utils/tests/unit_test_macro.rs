use crate::nn::GraphError;
use crate::{assert_err, assert_panic};

#[test]
fn test_assert_panic_macro() {
    assert_panic!(panic!("test panic"));
    assert_panic!(panic!("custom test panic msg"), "custom test panic msg");
}

#[test]
fn test_assert_err_macro() {
    let result: Result<(), GraphError> =
        Err(GraphError::InvalidOperation("节点不能作为反向传播的起点".to_string()));
    assert_err!(result);
    assert_err!(
        result,
        GraphError::InvalidOperation("节点不能作为反向传播的起点")
    );
    assert_err!(result, GraphError::InvalidOperation(msg) if msg.contains("反向传播"));

    let result: Result<(), GraphError> = Err(GraphError::ShapeMismatch {
        expected: vec![2, 2],
        got: vec![3, 2],
        message: "形状不符".to_string(),
    });
    assert_err!(result, GraphError::ShapeMismatch([2, 2], [3, 2], "形状不符"));
    assert_err!(result, GraphError::ShapeMismatch { expected, .. } if expected == &[2, 2]);

    let result: Result<(), GraphError> = Err(GraphError::DimensionMismatch {
        expected: 4,
        got: 1,
        message: "维数不足".to_string(),
    });
    assert_err!(result, GraphError::DimensionMismatch(4, 1));
}
