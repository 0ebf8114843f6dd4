use crate::nn::nodes::raw_node::{PassContext, TraitNode};
use crate::nn::{GraphError, Phase};
use crate::tensor::Tensor;

/// 拼接节点：把所有父节点沿`axis`依次拼接
///
/// setup 时记录每个父节点在`axis`上占据的区间，
/// 反向传播时按同样的区间把输出梯度切回各父节点。
#[derive(Clone)]
pub(in crate::nn) struct Concatenate {
    axis: usize,
    /// 各父节点在`axis`上的长度
    sections: Vec<usize>,
}

impl Concatenate {
    pub(in crate::nn) const fn new(axis: usize) -> Self {
        Self {
            axis,
            sections: Vec::new(),
        }
    }
}

impl TraitNode for Concatenate {
    fn type_name(&self) -> &'static str {
        "concatenate"
    }

    fn setup(&mut self, parent_shapes: &[&[usize]]) -> Result<Vec<usize>, GraphError> {
        let first = parent_shapes.first().ok_or_else(|| {
            GraphError::InvalidOperation("Concatenate节点至少需要1个父节点".to_string())
        })?;
        let axis = self.axis;
        if axis >= first.len() {
            return Err(GraphError::DimensionMismatch {
                expected: axis + 1,
                got: first.len(),
                message: format!("Concatenate节点的拼接维度{axis}超出了父节点的维数"),
            });
        }
        for shape in &parent_shapes[1..] {
            if shape.len() != first.len() {
                return Err(GraphError::DimensionMismatch {
                    expected: first.len(),
                    got: shape.len(),
                    message: "Concatenate节点的各父节点维数须一致".to_string(),
                });
            }
            let consistent = shape
                .iter()
                .zip(first.iter())
                .enumerate()
                .all(|(i, (a, b))| i == axis || a == b);
            if !consistent {
                return Err(GraphError::ShapeMismatch {
                    expected: first.to_vec(),
                    got: shape.to_vec(),
                    message: format!("Concatenate节点的各父节点除第{axis}维外形状须一致"),
                });
            }
        }
        self.sections = parent_shapes.iter().map(|shape| shape[axis]).collect();
        let mut shape = first.to_vec();
        shape[axis] = self.sections.iter().sum();
        Ok(shape)
    }

    fn fprop(
        &mut self,
        parents: &[&Tensor],
        value: &mut Tensor,
        _ctx: &mut PassContext,
    ) -> Result<(), GraphError> {
        value.concat_into(self.axis, parents);
        Ok(())
    }

    fn bprop(
        &self,
        _parents: &[&Tensor],
        _value: &Tensor,
        grad: &Tensor,
        _phase: Phase,
    ) -> Result<Vec<Tensor>, GraphError> {
        let mut start = 0;
        Ok(self
            .sections
            .iter()
            .map(|&len| {
                let section = grad.slice_axis(self.axis, start, start + len);
                start += len;
                section
            })
            .collect())
    }
}
