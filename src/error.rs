// src/error.rs

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PoseError>;

/// The four contract-violation kinds a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Shape,
    Index,
    Config,
    Interpolation,
}

/// Errors raised synchronously by the core when a call violates its contract.
///
/// Data-quality conditions (long missing runs, shortened boundary windows,
/// skipped frames) are never raised; they travel back as return-value metadata.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseError {
    /// Tensor dimensions disagree with the labels, or a required axis is empty.
    #[error("shape error: {0}")]
    Shape(String),

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("unknown instance '{0}'")]
    UnknownInstance(String),

    /// Invalid smoothing window/order combination or other bad parameter.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Not enough valid samples for the requested interpolation method.
    #[error("interpolation error: {method} needs {required} valid samples, found {available}")]
    Interpolation {
        method: &'static str,
        required: usize,
        available: usize,
    },
}

impl PoseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PoseError::Shape(_) => ErrorKind::Shape,
            PoseError::UnknownNode(_) | PoseError::UnknownInstance(_) => ErrorKind::Index,
            PoseError::Config(_) => ErrorKind::Config,
            PoseError::Interpolation { .. } => ErrorKind::Interpolation,
        }
    }
}
