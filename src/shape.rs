//! Shape and stride utilities for tensors.

use std::fmt;
use std::ops::Range;

use crate::error::{Result, TensorError};

/// A tensor shape (dimensions), axis 0 outermost.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape(pub Vec<usize>);

impl Shape {
    /// Create a new shape from dimensions.
    pub fn new(dims: Vec<usize>) -> Self {
        Shape(dims)
    }

    /// Create a scalar shape (0-dimensional).
    pub fn scalar() -> Self {
        Shape(vec![])
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Get dimension at index.
    ///
    /// # Panics
    ///
    /// If `idx >= self.ndim()`. Use [`Shape::get_dim`] for a checked lookup.
    pub fn dim(&self, idx: usize) -> usize {
        self.0[idx]
    }

    /// Get dimension at index, or `None` past the last axis.
    pub fn get_dim(&self, idx: usize) -> Option<usize> {
        self.0.get(idx).copied()
    }

    /// Get dimensions as slice.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Total number of elements. The empty shape is a scalar and holds one.
    pub fn size(&self) -> usize {
        self.0.iter().product()
    }

    /// Like [`Shape::size`], but `None` when the product overflows `usize`.
    pub fn checked_size(&self) -> Option<usize> {
        if self.0.contains(&0) {
            return Some(0);
        }
        self.0.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Check if this is a scalar (0-dim) shape.
    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    /// The shape without its leading axis.
    pub fn tail(&self) -> Shape {
        Shape(self.0.iter().skip(1).copied().collect())
    }

    /// Compute row-major (C-contiguous) strides for this shape.
    pub fn strides(&self) -> Strides {
        let ndim = self.0.len();
        if ndim == 0 {
            return Strides(vec![]);
        }

        let mut strides = vec![1usize; ndim];
        for i in (0..ndim - 1).rev() {
            strides[i] = strides[i + 1] * self.0[i + 1];
        }
        Strides(strides)
    }

    /// Locate the contiguous block addressed by `index` along axis 0.
    ///
    /// Returns the element range inside a buffer laid out by this shape
    /// together with the shape of the block.
    pub fn outer_block(&self, index: usize) -> Result<(Range<usize>, Shape)> {
        let Some(&len) = self.0.first() else {
            return Err(TensorError::RankMismatch {
                op: "at",
                required: "rank >= 1",
                actual: 0,
            });
        };
        if index >= len {
            return Err(TensorError::IndexOutOfBounds { index, len });
        }

        let tail = self.tail();
        let start = self.strides().index(&[index]);
        Ok((start..start + tail.size(), tail))
    }

    /// Flat offset of a full multi-index, bounds-checked on every axis.
    pub fn offset_of(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.ndim() {
            return Err(TensorError::RankMismatch {
                op: "index",
                required: "one index per axis",
                actual: indices.len(),
            });
        }
        for (&index, &len) in indices.iter().zip(self.0.iter()) {
            if index >= len {
                return Err(TensorError::IndexOutOfBounds { index, len });
            }
        }
        Ok(self.strides().index(indices))
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({:?})", self.0)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        if self.0.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

impl From<Vec<usize>> for Shape {
    fn from(v: Vec<usize>) -> Self {
        Shape(v)
    }
}

impl From<&[usize]> for Shape {
    fn from(s: &[usize]) -> Self {
        Shape(s.to_vec())
    }
}

/// Tensor strides (elements spanned by one step along each axis).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Strides(pub Vec<usize>);

impl Strides {
    pub fn new(strides: Vec<usize>) -> Self {
        Strides(strides)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Compute flat offset from multi-dimensional indices.
    ///
    /// A prefix of a full index addresses the first element of the
    /// contiguous block spanned by the remaining axes.
    pub fn index(&self, indices: &[usize]) -> usize {
        debug_assert!(indices.len() <= self.0.len());
        self.0.iter().zip(indices.iter()).map(|(s, i)| s * i).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_basics() {
        let s = Shape::new(vec![2, 3, 4]);
        assert_eq!(s.ndim(), 3);
        assert_eq!(s.dim(0), 2);
        assert_eq!(s.dim(2), 4);
        assert_eq!(s.size(), 24);
        assert!(!s.is_scalar());
    }

    #[test]
    fn test_scalar_shape() {
        let s = Shape::scalar();
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.size(), 1);
        assert!(s.is_scalar());
        assert!(s.strides().as_slice().is_empty());
    }

    #[test]
    fn test_zero_extent() {
        let s = Shape::new(vec![3, 0, 2]);
        assert_eq!(s.size(), 0);
        assert_eq!(s.strides().0, vec![0, 2, 1]);
    }

    #[test]
    fn test_checked_size() {
        assert_eq!(Shape::new(vec![2, 3, 4]).checked_size(), Some(24));
        assert_eq!(Shape::scalar().checked_size(), Some(1));
        assert_eq!(Shape::new(vec![0, usize::MAX]).checked_size(), Some(0));
        assert_eq!(Shape::new(vec![usize::MAX, 2, 0]).checked_size(), Some(0));
        assert_eq!(Shape::new(vec![1 << 32, 1 << 32]).checked_size(), None);
    }

    #[test]
    fn test_get_dim() {
        let s = Shape::new(vec![2, 3]);
        assert_eq!(s.get_dim(1), Some(3));
        assert_eq!(s.get_dim(2), None);
    }

    #[test]
    #[should_panic]
    fn test_dim_past_last_axis_panics() {
        Shape::new(vec![2, 3]).dim(2);
    }

    #[test]
    fn test_clone_is_independent() {
        let a = Shape::new(vec![2, 2]);
        let mut b = a.clone();
        b.0[0] = 7;
        assert_eq!(a.dims(), &[2, 2]);
        assert_eq!(b.dims(), &[7, 2]);
    }

    #[test]
    fn test_contiguous_strides() {
        let s = Shape::new(vec![2, 3, 4]);
        assert_eq!(s.strides().0, vec![12, 4, 1]);

        let s2 = Shape::new(vec![3, 4]);
        assert_eq!(s2.strides().0, vec![4, 1]);
    }

    #[test]
    fn test_stride_index() {
        let strides = Strides::new(vec![12, 4, 1]);
        assert_eq!(strides.index(&[0, 0, 0]), 0);
        assert_eq!(strides.index(&[0, 0, 1]), 1);
        assert_eq!(strides.index(&[0, 1, 0]), 4);
        assert_eq!(strides.index(&[1, 2, 3]), 12 + 8 + 3);
        // prefixes address block starts
        assert_eq!(strides.index(&[1]), 12);
        assert_eq!(strides.index(&[1, 1]), 16);
    }

    #[test]
    fn test_tail() {
        assert_eq!(Shape::new(vec![2, 3, 4]).tail(), Shape::new(vec![3, 4]));
        assert_eq!(Shape::new(vec![5]).tail(), Shape::scalar());
        assert_eq!(Shape::scalar().tail(), Shape::scalar());
    }

    #[test]
    fn test_outer_block() {
        let s = Shape::new(vec![2, 2, 2]);
        let (range, shape) = s.outer_block(1).unwrap();
        assert_eq!(range, 4..8);
        assert_eq!(shape, Shape::new(vec![2, 2]));

        assert!(matches!(
            s.outer_block(2),
            Err(TensorError::IndexOutOfBounds { index: 2, len: 2 })
        ));
        assert!(matches!(
            Shape::scalar().outer_block(0),
            Err(TensorError::RankMismatch { actual: 0, .. })
        ));
    }

    #[test]
    fn test_offset_of() {
        let s = Shape::new(vec![2, 3]);
        assert_eq!(s.offset_of(&[1, 2]).unwrap(), 5);
        assert!(matches!(
            s.offset_of(&[0, 3]),
            Err(TensorError::IndexOutOfBounds { index: 3, len: 3 })
        ));
        assert!(matches!(
            s.offset_of(&[1]),
            Err(TensorError::RankMismatch { actual: 1, .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::new(vec![2, 3]).to_string(), "(2, 3)");
        assert_eq!(Shape::new(vec![4]).to_string(), "(4,)");
        assert_eq!(Shape::scalar().to_string(), "()");
    }
}
