//! Owned tensors and the accessor traits shared with sub-views.

use std::fmt;

use rand::Rng;

use crate::error::{Result, TensorError};
use crate::shape::Shape;
use crate::view::{TensorView, TensorViewMut};
use crate::{linalg, operation};

/// Rank every owned tensor is padded up to, so matrix semantics always apply.
pub const MIN_RANK: usize = 2;

/// Read access to a row-major buffer and the shape describing it.
///
/// Implemented by [`Tensor`] and by the borrowed views returned from
/// [`TensorData::at`] and [`TensorDataMut::at_mut`].
pub trait TensorData {
    /// Get the shape of this tensor.
    fn shape(&self) -> &Shape;

    /// Get the flat backing buffer.
    fn get(&self) -> &[f64];

    /// Number of elements held in the buffer.
    fn size(&self) -> usize {
        self.get().len()
    }

    fn ndim(&self) -> usize {
        self.shape().ndim()
    }

    /// True iff both shapes have equal rank and matching extents.
    fn same_shape<T: TensorData + ?Sized>(&self, other: &T) -> bool {
        self.shape() == other.shape()
    }

    /// Zero-copy view of the `k`th block along axis 0.
    fn at(&self, k: usize) -> Result<TensorView<'_>> {
        let (range, shape) = self.shape().outer_block(k).map_err(|e| {
            log::debug!("at({}) rejected on shape {}: {}", k, self.shape(), e);
            e
        })?;
        Ok(TensorView::new(&self.get()[range], shape))
    }

    /// Element at a full multi-index.
    fn value(&self, indices: &[usize]) -> Result<f64> {
        let offset = self.shape().offset_of(indices)?;
        Ok(self.get()[offset])
    }

    /// Vector dot product over the flat buffers.
    fn dot<T: TensorData + ?Sized>(&self, other: &T) -> Result<f64> {
        linalg::dot(self, other)
    }

    /// Matrix product of two rank-2 operands.
    fn matmul<T: TensorData + ?Sized>(&self, other: &T) -> Result<Tensor> {
        linalg::matmul(self, other)
    }

    /// Copy into a freshly owned tensor. This is the deep copy for views,
    /// which share their parent's storage.
    fn to_tensor(&self) -> Tensor {
        Tensor::from_parts(self.get().to_vec(), self.shape().dims())
    }
}

/// Write access; elementwise operations mutate in place and allocate nothing.
pub trait TensorDataMut: TensorData {
    /// Get the flat backing buffer mutably.
    fn get_mut(&mut self) -> &mut [f64];

    /// Copy `values` into the buffer. Copies as many elements as both sides hold.
    fn set(&mut self, values: &[f64]) {
        let dst = self.get_mut();
        let n = dst.len().min(values.len());
        dst[..n].copy_from_slice(&values[..n]);
    }

    fn set_value(&mut self, indices: &[usize], value: f64) -> Result<()> {
        let offset = self.shape().offset_of(indices)?;
        self.get_mut()[offset] = value;
        Ok(())
    }

    /// Mutable zero-copy view of the `k`th block along axis 0.
    fn at_mut(&mut self, k: usize) -> Result<TensorViewMut<'_>> {
        let (range, shape) = self.shape().outer_block(k).map_err(|e| {
            log::debug!("at_mut({}) rejected on shape {}: {}", k, self.shape(), e);
            e
        })?;
        Ok(TensorViewMut::new(&mut self.get_mut()[range], shape))
    }

    /// `self[i] += other[i]`; element counts must match.
    fn add<T: TensorData + ?Sized>(&mut self, other: &T) -> Result<()> {
        operation::add(self, other)
    }

    fn add_scalar(&mut self, delta: f64) {
        operation::add_scalar(self.get_mut(), delta)
    }

    /// `self[i] -= other[i]` over the length of `other`, which may be shorter.
    fn subtract<T: TensorData + ?Sized>(&mut self, other: &T) -> Result<()> {
        operation::subtract(self, other)
    }

    /// Hadamard product, in place.
    fn schur<T: TensorData + ?Sized>(&mut self, other: &T) -> Result<()> {
        operation::schur(self, other)
    }

    fn square(&mut self) {
        operation::square(self.get_mut())
    }
}

/// A dense row-major tensor owning its buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    data: Vec<f64>,
    shape: Shape,
}

impl Tensor {
    /// Create a zero-filled tensor. Fewer than two extents get unit axes
    /// prepended: `[]` becomes `[1, 1]` and `[3]` becomes `[1, 3]`.
    ///
    /// # Panics
    ///
    /// If the element count overflows `usize`, the allocation fails the same
    /// way an oversized `vec!` does. Use [`Tensor::from_vec`] to get an error.
    pub fn new(dims: &[usize]) -> Self {
        let shape = normalize(dims);
        Tensor {
            data: vec![0.0; allocation_len(&shape)],
            shape,
        }
    }

    /// Wrap an existing buffer; its length must equal the product of `dims`.
    pub fn from_vec(data: Vec<f64>, dims: &[usize]) -> Result<Self> {
        let shape = normalize(dims);
        if shape.checked_size() != Some(data.len()) {
            log::debug!(
                "from_vec rejected: {} elements for shape {}",
                data.len(),
                shape
            );
            return Err(TensorError::ShapeMismatch {
                op: "from_vec",
                left: shape,
                right: Shape::new(vec![data.len()]),
            });
        }
        Ok(Tensor { data, shape })
    }

    /// Tensor of uniform samples in `[-1, 1)`.
    ///
    /// # Panics
    ///
    /// On element count overflow, as [`Tensor::new`].
    pub fn random<R: Rng>(dims: &[usize], rng: &mut R) -> Self {
        let shape = normalize(dims);
        let data = (0..allocation_len(&shape))
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();
        Tensor { data, shape }
    }

    /// Callers guarantee `data.len()` matches `dims`.
    pub(crate) fn from_parts(data: Vec<f64>, dims: &[usize]) -> Self {
        let shape = normalize(dims);
        debug_assert_eq!(data.len(), shape.size());
        Tensor { data, shape }
    }

    /// Borrow the whole tensor as a view.
    pub fn view(&self) -> TensorView<'_> {
        TensorView::new(&self.data, self.shape.clone())
    }

    pub fn view_mut(&mut self) -> TensorViewMut<'_> {
        TensorViewMut::new(&mut self.data, self.shape.clone())
    }

    /// Swap axes 0 and 1; trailing axes travel with each position as a block.
    pub fn transpose(&self) -> Tensor {
        // rank >= MIN_RANK holds for every owned tensor
        linalg::transpose_blocks(&self.shape, &self.data)
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

impl TensorData for Tensor {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn get(&self) -> &[f64] {
        &self.data
    }
}

impl TensorDataMut for Tensor {
    fn get_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor(shape={}, data={:?})", self.shape, self.data)
    }
}

/// Overflowing shapes request `usize::MAX` elements, which no allocator
/// grants, instead of a wrapped length that would break `len == size`.
fn allocation_len(shape: &Shape) -> usize {
    shape.checked_size().unwrap_or(usize::MAX)
}

fn normalize(dims: &[usize]) -> Shape {
    let mut padded = vec![1; MIN_RANK.saturating_sub(dims.len())];
    padded.extend_from_slice(dims);
    Shape::new(padded)
}
