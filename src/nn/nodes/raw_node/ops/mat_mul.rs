use super::check_parent_count;
use crate::nn::nodes::raw_node::{PassContext, TraitNode};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 矩阵乘法节点
///
/// forward: C = A · B，A 为 [m, k]，B 为 [k, n]
/// backward: dL/dA = dL/dC · Bᵀ，dL/dB = Aᵀ · dL/dC
#[derive(Clone, Default)]
pub(in crate::nn) struct MatMul;

impl TraitNode for MatMul {
    fn type_name(&self) -> &'static str {
        "mat_mul"
    }

    fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
        check_parent_count(self.type_name(), parent_shapes, 2)?;
        let (a, b) = (parent_shapes[0], parent_shapes[1]);
        for shape in [a, b] {
            if shape.len() != 2 {
                return Err(GraphError::DimensionMismatch {
                    expected: 2,
                    got: shape.len(),
                    message: format!("MatMul节点的父节点须为矩阵，但其形状为{shape:?}"),
                });
            }
        }
        if a[1] != b[0] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![a[1], b[1]],
                got: b.to_vec(),
                message: format!(
                    "MatMul节点的第1个父节点的列数{}与第2个父节点的行数{}不相等",
                    a[1], b[0]
                ),
            });
        }
        Ok(vec![a[0], b[1]])
    }

    fn fprop(
        &mut self,
        parents: &[&Tensor],
        value: &mut Tensor,
        _ctx: &mut PassContext,
    ) -> Result<(), GraphError> {
        value.mat_mul_into(parents[0], parents[1]);
        Ok(())
    }

    fn bprop(
        &self,
        parents: &[&Tensor],
        _value: &Tensor,
        grad: &Tensor,
        _phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        let (a, b) = (parents[0], parents[1]);
        Ok(vec![
            grad.mat_mul(&b.transpose()),
            a.transpose().mat_mul(grad),
        ])
    }
}
