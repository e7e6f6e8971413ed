//! # aten-rs - dense row-major tensors
//!
//! A contiguous `f64` buffer addressed through a [`Shape`], with in-place
//! elementwise arithmetic, zero-copy sub-views, vector and matrix products
//! and transposition.
//!
//! - [`Shape`] and [`Strides`] - dimensions and the row-major offset mapping
//! - [`Tensor`] - owned tensor, always at least rank 2
//! - [`TensorView`] / [`TensorViewMut`] - windows into a parent's storage
//! - [`TensorData`] / [`TensorDataMut`] - operations shared by all of them
//!
//! ## Example
//!
//! ```
//! use aten_rs::prelude::*;
//!
//! let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;
//! let b = Tensor::from_vec(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], &[3, 2])?;
//! let c = a.matmul(&b)?;
//! assert_eq!(c.get(), &[58.0, 64.0, 139.0, 154.0]);
//! assert_eq!(c.transpose().get(), &[58.0, 139.0, 64.0, 154.0]);
//! # Ok::<(), aten_rs::TensorError>(())
//! ```

pub mod error;
pub mod interop;
pub mod linalg;
mod operation;
pub mod shape;
pub mod tensor;
pub mod view;

pub use error::{Result, TensorError};
pub use shape::{Shape, Strides};
pub use tensor::{Tensor, TensorData, TensorDataMut};
pub use view::{TensorView, TensorViewMut};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::TensorError;
    pub use crate::shape::{Shape, Strides};
    pub use crate::tensor::{Tensor, TensorData, TensorDataMut};
    pub use crate::view::{TensorView, TensorViewMut};
}
