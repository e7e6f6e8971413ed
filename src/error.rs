//! Error type shared by every fallible tensor operation.

use crate::shape::Shape;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TensorError>;

#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// Operand shapes or element counts are incompatible for `op`.
    #[error("{op}: shape mismatch between {left} and {right}")]
    ShapeMismatch {
        op: &'static str,
        left: Shape,
        right: Shape,
    },
    /// Index past the extent of the addressed axis.
    #[error("index {index} out of bounds for axis of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// Operand rank unsuitable for `op`.
    #[error("{op} requires {required}, got rank {actual}")]
    RankMismatch {
        op: &'static str,
        required: &'static str,
        actual: usize,
    },
    /// ndarray refused the layout handed to it.
    #[error("ndarray layout: {0}")]
    Layout(#[from] ndarray::ShapeError),
}
