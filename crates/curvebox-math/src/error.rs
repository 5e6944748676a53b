//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Node and weight vectors have different lengths.
    #[error("Size mismatch: {nodes} nodes but {weights} weights")]
    SizeMismatch {
        /// Number of nodes.
        nodes: usize,
        /// Number of weights.
        weights: usize,
    },
}

impl MathError {
    /// Creates a size mismatch error.
    #[must_use]
    pub fn size_mismatch(nodes: usize, weights: usize) -> Self {
        Self::SizeMismatch { nodes, weights }
    }
}
