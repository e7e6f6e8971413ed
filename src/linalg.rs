//! Vector dot product, matrix product and transpose.
//!
//! All addressing goes through [`Shape::strides`], so the offsets used here
//! agree with the ones used by indexing.

use crate::error::{Result, TensorError};
use crate::shape::Shape;
use crate::tensor::{Tensor, TensorData};

/// Sum of `a[i] * b[i]` over the flat buffers. Element counts must match.
pub fn dot<A, B>(a: &A, b: &B) -> Result<f64>
where
    A: TensorData + ?Sized,
    B: TensorData + ?Sized,
{
    if a.size() != b.size() {
        log::debug!("dot rejected: {} against {}", a.shape(), b.shape());
        return Err(TensorError::ShapeMismatch {
            op: "dot",
            left: a.shape().clone(),
            right: b.shape().clone(),
        });
    }
    Ok(a.get().iter().zip(b.get()).map(|(x, y)| x * y).sum())
}

/// Matrix product of an `[R, K]` and a `[K, C]` operand, giving `[R, C]`.
///
/// Each output element accumulates over `k` in ascending order starting
/// from zero, so results are reproducible bit for bit.
pub fn matmul<A, B>(a: &A, b: &B) -> Result<Tensor>
where
    A: TensorData + ?Sized,
    B: TensorData + ?Sized,
{
    let (lhs, rhs) = (a.shape(), b.shape());
    for shape in [lhs, rhs] {
        if shape.ndim() != 2 {
            log::debug!("matmul rejected: operand of shape {}", shape);
            return Err(TensorError::RankMismatch {
                op: "matmul",
                required: "rank 2",
                actual: shape.ndim(),
            });
        }
    }
    let (rows, inner, cols) = (lhs.dim(0), lhs.dim(1), rhs.dim(1));
    if rhs.dim(0) != inner {
        log::debug!("matmul rejected: {} x {}", lhs, rhs);
        return Err(TensorError::ShapeMismatch {
            op: "matmul",
            left: lhs.clone(),
            right: rhs.clone(),
        });
    }
    log::trace!("matmul {} x {}", lhs, rhs);

    let (lhs_strides, rhs_strides) = (lhs.strides(), rhs.strides());
    let (lhs_data, rhs_data) = (a.get(), b.get());
    let mut out = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let mut acc = 0.0;
            for k in 0..inner {
                let x = lhs_data[lhs_strides.index(&[r, k])];
                let y = rhs_data[rhs_strides.index(&[k, c])];
                acc += x * y;
            }
            out.push(acc);
        }
    }
    Ok(Tensor::from_parts(out, &[rows, cols]))
}

/// Swap axes 0 and 1 of a rank >= 2 buffer, moving each position's trailing
/// block of `product(shape[2..])` elements as one unit.
pub(crate) fn transpose_blocks(shape: &Shape, data: &[f64]) -> Tensor {
    debug_assert!(shape.ndim() >= 2);
    let mut dims = shape.dims().to_vec();
    dims.swap(0, 1);
    log::trace!("transpose {} -> {}", shape, Shape::from(dims.as_slice()));

    let src_strides = shape.strides();
    let block = Shape::from(&shape.dims()[2..]).size();
    let mut out = Vec::with_capacity(data.len());
    for i in 0..dims[0] {
        for j in 0..dims[1] {
            let m = src_strides.index(&[j, i]);
            out.extend_from_slice(&data[m..m + block]);
        }
    }
    Tensor::from_parts(out, &dims)
}
