//! 单元测试用的断言宏：`assert_err!`校验`Result<_, GraphError>`之类的错误，`assert_panic!`校验张量运算的 panic 消息

/// 非预期分支的统一报错：`Err`类型不对，或者根本没出错
#[doc(hidden)]
#[macro_export]
macro_rules! __unexpected_result {
    ($result:expr, $wanted:expr) => {
        match $result {
            Err(e) => panic!("错误类型不匹配：预期 `{}`，实际得到 `{:?}`", $wanted, e),
            Ok(v) => panic!("预期 Err({})，实际得到 Ok({:?})", $wanted, v),
        }
    };
}

/// 按需要的粒度校验一个`Result`是否为指定错误
///
/// ```ignore
/// assert_err!(graph.fprop());
/// assert_err!(result, GraphError::InvalidOperation("Concatenate节点至少需要1个父节点"));
/// assert_err!(result, GraphError::ShapeMismatch([2, 2], [3, 2], "消息"));
/// assert_err!(result, GraphError::DimensionMismatch(2, 1));
/// assert_err!(result, GraphError::NodeNotFound(id));
/// assert_err!(result, GraphError::InvalidOperation(msg) if msg.contains("反向传播"));
/// ```
/// 除第一种外，`Ok`分支会打印其值，因此`Ok`的类型须实现`Debug`。
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        assert!($expr.is_err(), "预期 Err，实际得到 {:?}", $expr);
    };
    // 变体携带的字符串须与字面量完全一致
    ($expr:expr, $err_type:ident :: $variant:ident ( $expected:literal )) => {
        match &$expr {
            Err($err_type::$variant(actual)) => {
                assert_eq!(actual, $expected, "错误消息不匹配");
            }
            other => $crate::__unexpected_result!(
                other,
                concat!(stringify!($err_type), "::", stringify!($variant))
            ),
        }
    };
    // 按 expected、got、message 的顺序
    ($expr:expr, $err_type:ident :: ShapeMismatch ( $exp:expr, $got:expr, $msg:expr )) => {
        match &$expr {
            Err($err_type::ShapeMismatch { expected, got, message }) => {
                assert_eq!(expected.as_slice(), &$exp, "expected 不匹配");
                assert_eq!(got.as_slice(), &$got, "got 不匹配");
                assert_eq!(message, $msg, "message 不匹配");
            }
            other => $crate::__unexpected_result!(
                other,
                concat!(stringify!($err_type), "::ShapeMismatch")
            ),
        }
    };
    // 只比较维数，不比较附带的消息
    ($expr:expr, $err_type:ident :: DimensionMismatch ( $exp:expr, $got:expr )) => {
        match &$expr {
            Err($err_type::DimensionMismatch { expected, got, .. }) => {
                assert_eq!(*expected, $exp, "expected 不匹配");
                assert_eq!(*got, $got, "got 不匹配");
            }
            other => $crate::__unexpected_result!(
                other,
                concat!(stringify!($err_type), "::DimensionMismatch")
            ),
        }
    };
    ($expr:expr, $err_type:ident :: NodeNotFound ( $id:expr )) => {
        match &$expr {
            Err($err_type::NodeNotFound(id)) => assert_eq!(*id, $id, "节点id不匹配"),
            other => $crate::__unexpected_result!(
                other,
                concat!(stringify!($err_type), "::NodeNotFound")
            ),
        }
    };
    // 其余情况按任意模式匹配，可带 if 守卫
    ($expr:expr, $($pattern:tt)+) => {
        match &$expr {
            Err(e) if matches!(e, $($pattern)+) => {}
            other => $crate::__unexpected_result!(other, stringify!($($pattern)+)),
        }
    };
}

/// 断言表达式会 panic；给出第二个参数时还要求 panic 消息与之完全一致
#[macro_export]
macro_rules! assert_panic {
    ($expr:expr) => {{
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $expr));
        assert!(result.is_err(), "表达式没有触发panic");
    }};
    ($expr:expr, $expected_msg:expr) => {{
        let err = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $expr))
            .err()
            .unwrap_or_else(|| panic!("表达式没有触发panic"));
        let expected = $expected_msg.to_string();
        let actual = err
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| err.downcast_ref::<&'static str>().map(|msg| msg.to_string()))
            .unwrap_or_else(|| panic!("未找到panic消息，预期的消息为: {expected}"));
        assert_eq!(actual, expected, "panic消息与预期不符");
    }};
}
