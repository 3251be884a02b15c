//! Error type for the command line front end

use thiserror::Error;

/// Everything a sub-command can fail with
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading or writing an image failed
    #[error(transparent)]
    Io(#[from] ppmwarp_io::IoError),

    /// The transform parameters were rejected
    #[error(transparent)]
    Transform(#[from] ppmwarp_transform::TransformError),

    /// Core error (bad color string, dimension mismatch, ...)
    #[error(transparent)]
    Core(#[from] ppmwarp_core::Error),

    /// Invalid combination or value of command line arguments
    #[error("{0}")]
    Usage(String),

    /// A verification command found a violation
    #[error("{0}")]
    Check(String),
}

/// Result type for sub-commands
pub type CliResult<T> = Result<T, CliError>;
