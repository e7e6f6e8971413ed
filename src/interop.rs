//! Conversions to and from `ndarray` and `nalgebra` containers.

use nalgebra::DMatrix;
use ndarray::{ArrayD, ArrayViewD, IxDyn};

use crate::error::{Result, TensorError};
use crate::tensor::{Tensor, TensorData};
use crate::view::TensorView;

impl Tensor {
    /// Copy into an owned ndarray array of the same shape.
    pub fn to_ndarray(&self) -> Result<ArrayD<f64>> {
        Ok(ArrayD::from_shape_vec(
            IxDyn(self.shape().dims()),
            self.get().to_vec(),
        )?)
    }

    /// Copy a rank-2 tensor into a nalgebra matrix.
    pub fn to_dmatrix(&self) -> Result<DMatrix<f64>> {
        let shape = self.shape();
        if shape.ndim() != 2 {
            return Err(TensorError::RankMismatch {
                op: "to_dmatrix",
                required: "rank 2",
                actual: shape.ndim(),
            });
        }
        Ok(DMatrix::from_row_slice(shape.dim(0), shape.dim(1), self.get()))
    }
}

impl<'a> TensorView<'a> {
    /// Zero-copy ndarray view over the same elements.
    pub fn as_array(&self) -> Result<ArrayViewD<'a, f64>> {
        Ok(ArrayViewD::from_shape(
            IxDyn(self.shape().dims()),
            self.as_slice(),
        )?)
    }
}

/// Elements are taken in logical row-major order whatever the array's layout.
impl From<ArrayD<f64>> for Tensor {
    fn from(array: ArrayD<f64>) -> Self {
        let data = array.iter().copied().collect();
        Tensor::from_parts(data, array.shape())
    }
}

impl From<&DMatrix<f64>> for Tensor {
    fn from(matrix: &DMatrix<f64>) -> Self {
        let (rows, cols) = matrix.shape();
        let data = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| matrix[(r, c)]))
            .collect();
        Tensor::from_parts(data, &[rows, cols])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array3};

    #[test]
    fn test_ndarray_roundtrip_keeps_shape() {
        let t = Tensor::from_vec((0..24).map(f64::from).collect(), &[2, 3, 4]).unwrap();
        let array = t.to_ndarray().unwrap();
        assert_eq!(array.shape(), &[2, 3, 4]);
        assert_eq!(array[[1, 2, 3]], t.value(&[1, 2, 3]).unwrap());
        assert_eq!(Tensor::from(array), t);
    }

    #[test]
    fn test_from_non_standard_layout() {
        let array = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).reversed_axes();
        let t = Tensor::from(array.into_dyn());
        assert_eq!(t.shape().dims(), &[3, 2]);
        assert_eq!(t.get(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_from_low_rank_array_is_normalized() {
        let array = ndarray::arr1(&[1.0, 2.0]).into_dyn();
        assert_eq!(Tensor::from(array).shape().dims(), &[1, 2]);
    }

    #[test]
    fn test_view_as_array_aliases() {
        let cube = Array3::from_shape_fn((2, 2, 2), |(i, j, k)| (4 * i + 2 * j + k) as f64);
        let t = Tensor::from(cube.into_dyn());
        let view = t.at(1).unwrap();
        let array = view.as_array().unwrap();
        assert_eq!(array.shape(), &[2, 2]);
        assert_eq!(array[[1, 0]], 6.0);
        assert!(std::ptr::eq(array.as_ptr(), t.get()[4..].as_ptr()));
    }

    #[test]
    fn test_dmatrix_roundtrip() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let m = t.to_dmatrix().unwrap();
        assert_eq!(m.nrows(), 2);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(Tensor::from(&m), t);

        assert!(Tensor::new(&[2, 2, 2]).to_dmatrix().is_err());
    }
}
