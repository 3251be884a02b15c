//! Error types for ppmwarp-transform

use thiserror::Error;

/// Errors that can occur when configuring a transform run
///
/// The individual stages are total; errors only arise from parameter
/// combinations that cannot be honored.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
