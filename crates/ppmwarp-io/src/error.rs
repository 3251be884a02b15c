//! I/O error types
//!
//! Provides a unified error type for reading and writing P3 files so that
//! callers only need to handle one error type. Every format violation is
//! fatal; there is no partial-read recovery.

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The first line is not the `P3` signature
    #[error("not an ASCII P3 PPM")]
    NotP3,

    /// Input ended before width, height and maxval were read
    #[error("truncated header")]
    TruncatedHeader,

    /// Width or height is not positive
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// Only maxval 255 is supported
    #[error("expected maxval 255, got {0}")]
    InvalidMaxval(i64),

    /// A header or pixel token is not an integer
    #[error("invalid integer for {what}: '{token}'")]
    InvalidToken { what: &'static str, token: String },

    /// A channel value lies outside `[0, 255]`
    #[error("pixel value out of range: {0}")]
    PixelOutOfRange(i64),

    /// The number of channel values does not match `width * height * 3`
    #[error("pixel count mismatch (wanted {expected}, got {actual})")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] ppmwarp_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
