use crate::assert_panic;
use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓加减乘除↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_arithmetic_with_or_without_ownership() {
    let tensor1 = Tensor::new(&[1., 2., 3.], &[3]);
    let tensor2 = Tensor::new(&[4., 5., 6.], &[3]);

    assert_eq!(&tensor1 + &tensor2, Tensor::new(&[5., 7., 9.], &[3]));
    assert_eq!(tensor1.clone() + &tensor2, Tensor::new(&[5., 7., 9.], &[3]));
    assert_eq!(&tensor2 - &tensor1, Tensor::new(&[3., 3., 3.], &[3]));
    assert_eq!(&tensor1 * &tensor2, Tensor::new(&[4., 10., 18.], &[3]));
    assert_eq!(tensor1.clone() * tensor2.clone(), Tensor::new(&[4., 10., 18.], &[3]));
    assert_eq!(&tensor2 / &tensor1, Tensor::new(&[4., 2.5, 2.], &[3]));

    // 与纯数运算
    assert_eq!(5. * &tensor1, Tensor::new(&[5., 10., 15.], &[3]));
    assert_eq!(&tensor1 * 5., Tensor::new(&[5., 10., 15.], &[3]));
    assert_eq!(1. - &tensor1, Tensor::new(&[0., -1., -2.], &[3]));
    assert_eq!(&tensor1 + 1., Tensor::new(&[2., 3., 4.], &[3]));

    // 验证原始张量仍然可用
    assert_eq!(tensor1, Tensor::new(&[1., 2., 3.], &[3]));
    assert_eq!(tensor2, Tensor::new(&[4., 5., 6.], &[3]));
}

#[test]
fn test_arithmetic_with_broadcast() {
    let matrix = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let row = Tensor::new(&[10., 20., 30.], &[1, 3]);
    let column = Tensor::new(&[2., 3.], &[2, 1]);

    assert_eq!(
        &matrix + &row,
        Tensor::new(&[11., 22., 33., 14., 25., 36.], &[2, 3])
    );
    assert_eq!(
        &matrix * &column,
        Tensor::new(&[2., 4., 6., 12., 15., 18.], &[2, 3])
    );
}

#[test]
fn test_arithmetic_with_incompatible_shape() {
    let tensor1 = Tensor::new(&[1., 2.], &[2]);
    let tensor2 = Tensor::new(&[1., 2., 3.], &[3]);
    assert_panic!(
        &tensor1 + &tensor2,
        TensorError::OperatorError {
            operator: Operator::Add,
            tensor1_shape: vec![2],
            tensor2_shape: vec![3],
        }
    );
    assert_panic!(
        &tensor1 * &tensor2,
        "形状不一致，故无法相乘：第一个张量的形状为[2]，第二个张量的形状为[3]"
    );
}

#[test]
fn test_neg() {
    let tensor = Tensor::new(&[1., -2., 0.], &[3]);
    assert_eq!(-&tensor, Tensor::new(&[-1., 2., 0.], &[3]));
    assert_eq!(-tensor, Tensor::new(&[-1., 2., 0.], &[3]));
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑加减乘除↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓原地累加↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_add_assign() {
    let mut tensor = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    tensor += &Tensor::new(&[1., 1., 1., 1.], &[2, 2]);
    assert_eq!(tensor, Tensor::new(&[2., 3., 4., 5.], &[2, 2]));
    tensor += 1.;
    assert_eq!(tensor, Tensor::new(&[3., 4., 5., 6.], &[2, 2]));
}

#[test]
fn test_add_assign_requires_same_shape() {
    let mut tensor = Tensor::zeros(&[2, 2]);
    assert_panic!(
        tensor += &Tensor::zeros(&[1, 2]),
        "形状不一致，故无法自相加：第一个张量的形状为[2, 2]，第二个张量的形状为[1, 2]"
    );
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑原地累加↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
