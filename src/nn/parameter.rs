/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @Description  : 可训练参数：可在多个计算图之间共享的值与梯度缓冲区
 */

use crate::tensor::Tensor;
use rand::Rng;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

struct ParameterData {
    name: String,
    value: Tensor,
    grad: Tensor,
}

/// 可训练参数的共享句柄
///
/// 克隆只增加引用计数，所以同一个参数可以同时挂在训练图和生成图上。
/// 前向传播时，参数节点把这里的`value`拷贝到自己的输出；
/// 反向传播结束后，参数节点收到的梯度被累加回这里的`grad`，供优化器读取。
#[derive(Clone)]
pub struct Parameter {
    inner: Rc<RefCell<ParameterData>>,
}

impl Parameter {
    pub fn new(name: &str, value: Tensor) -> Self {
        let grad = Tensor::zeros(value.shape());
        Self {
            inner: Rc::new(RefCell::new(ParameterData {
                name: name.to_string(),
                value,
                grad,
            })),
        }
    }

    pub fn zeros(name: &str, shape: &[usize]) -> Self {
        Self::new(name, Tensor::zeros(shape))
    }

    /// 从均匀分布 U(-scale, scale) 中随机初始化
    pub fn uniform<R: Rng + ?Sized>(name: &str, shape: &[usize], scale: f32, rng: &mut R) -> Self {
        Self::new(name, Tensor::uniform(-scale, scale, shape, rng))
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn shape(&self) -> Vec<usize> {
        self.inner.borrow().value.shape().to_vec()
    }

    pub fn value(&self) -> Ref<'_, Tensor> {
        Ref::map(self.inner.borrow(), |data| &data.value)
    }

    pub fn grad(&self) -> Ref<'_, Tensor> {
        Ref::map(self.inner.borrow(), |data| &data.grad)
    }

    /// 设置参数值（形状必须与原值一致，否则panic）
    pub fn set_value(&self, value: &Tensor) {
        self.inner.borrow_mut().value.assign(value);
    }

    pub fn zero_grad(&self) {
        self.inner.borrow_mut().grad.fill(0.0);
    }

    pub(in crate::nn) fn accumulate_grad(&self, grad: &Tensor) {
        self.inner.borrow_mut().grad += grad;
    }

    /// 梯度下降：value ← value - learning_rate * grad
    pub fn apply_gradient(&self, learning_rate: f32) {
        let mut data = self.inner.borrow_mut();
        let step = &data.grad * learning_rate;
        let updated = &data.value - &step;
        data.value.assign(&updated);
    }

    /// 两个句柄是否指向同一个参数
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("Parameter")
            .field("name", &data.name)
            .field("shape", &data.value.shape())
            .finish()
    }
}
