//! Error types for ImagePrep.

use thiserror::Error;

/// Main error type for ImagePrep operations.
#[derive(Error, Debug)]
pub enum ImagePrepError {
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("allocation failed: {0}")]
    AllocationFailed(String),

    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    #[error("buffer size mismatch: expected {expected} bytes, got {got}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("row range {start}..{end} outside image height {height}")]
    RowRange { start: u32, end: u32, height: u32 },
}

/// Result type alias for ImagePrep operations.
pub type Result<T> = std::result::Result<T, ImagePrepError>;
