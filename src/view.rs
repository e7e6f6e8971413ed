//! Borrowed windows into another tensor's storage.
//!
//! A view never owns its elements: it holds a slice of the parent's buffer
//! and therefore cannot outlive it. Writes through a [`TensorViewMut`] land
//! directly in the parent.

use crate::error::{Result, TensorError};
use crate::linalg;
use crate::shape::Shape;
use crate::tensor::{Tensor, TensorData, TensorDataMut};

/// Read-only view, as returned by [`TensorData::at`].
///
/// Views are not `Clone`: a copy of the elements is always a new owner,
/// made with [`TensorData::to_tensor`].
///
/// ```compile_fail
/// use aten_rs::prelude::*;
///
/// let t = Tensor::new(&[2, 2]);
/// let view = t.at(0).unwrap();
/// let alias: TensorView = view.clone();
/// ```
#[derive(Debug, PartialEq)]
pub struct TensorView<'a> {
    data: &'a [f64],
    shape: Shape,
}

impl<'a> TensorView<'a> {
    pub(crate) fn new(data: &'a [f64], shape: Shape) -> Self {
        debug_assert_eq!(data.len(), shape.size());
        TensorView { data, shape }
    }

    /// The viewed elements, borrowed for the parent's lifetime.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Swap axes 0 and 1 into a new tensor. Views may have lost axes to
    /// indexing, so rank is checked here.
    pub fn transpose(&self) -> Result<Tensor> {
        if self.shape.ndim() < 2 {
            log::debug!("transpose rejected on view of shape {}", self.shape);
            return Err(TensorError::RankMismatch {
                op: "transpose",
                required: "rank >= 2",
                actual: self.shape.ndim(),
            });
        }
        Ok(linalg::transpose_blocks(&self.shape, self.data))
    }
}

impl TensorData for TensorView<'_> {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn get(&self) -> &[f64] {
        self.data
    }
}

/// Mutable view, as returned by [`TensorDataMut::at_mut`].
#[derive(Debug)]
pub struct TensorViewMut<'a> {
    data: &'a mut [f64],
    shape: Shape,
}

impl<'a> TensorViewMut<'a> {
    pub(crate) fn new(data: &'a mut [f64], shape: Shape) -> Self {
        debug_assert_eq!(data.len(), shape.size());
        TensorViewMut { data, shape }
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> TensorView<'_> {
        TensorView::new(&*self.data, self.shape.clone())
    }

    pub fn transpose(&self) -> Result<Tensor> {
        self.as_view().transpose()
    }
}

impl TensorData for TensorViewMut<'_> {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn get(&self) -> &[f64] {
        &*self.data
    }
}

impl TensorDataMut for TensorViewMut<'_> {
    fn get_mut(&mut self) -> &mut [f64] {
        &mut *self.data
    }
}
