use crate::tensor::Tensor;
use ndarray::Axis;
use std::fmt;

/// 单行最多展示的元素个数，超出部分以`...`省略
const MAX_ROW_ITEMS: usize = 8;

fn write_row<'a>(f: &mut fmt::Formatter, row: impl ExactSizeIterator<Item = &'a f32>) -> fmt::Result {
    let len = row.len();
    write!(f, "[")?;
    for (i, value) in row.take(MAX_ROW_ITEMS).enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{value:8.4}")?;
    }
    if len > MAX_ROW_ITEMS {
        write!(f, ", ... (共{len}个)")?;
    }
    write!(f, "]")
}

/// 标量和向量打印为一行；矩阵逐行打印；
/// 更高阶的张量按第0维逐行打印，每行是其余各维展平后的数据。
impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shape = self.shape();
        if shape.len() <= 1 {
            write_row(f, self.data.iter())?;
        } else {
            write!(f, "[")?;
            for (i, row) in self.data.axis_iter(Axis(0)).enumerate() {
                if i > 0 {
                    write!(f, ",\n ")?;
                }
                write_row(f, row.iter())?;
            }
            write!(f, "]")?;
        }
        write!(f, "\n形状: {shape:?}")
    }
}
