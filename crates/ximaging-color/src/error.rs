//! Error types for ximaging-color

use thiserror::Error;
use ximaging_core::ErrorCode;

/// Errors that can occur during color operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ximaging_core::Error),

    /// A value range whose bounds are reversed or degenerate
    #[error("invalid range: {0}")]
    InvalidRange(String),
}

impl ColorError {
    /// Numeric status code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ColorError::Core(e) => e.code(),
            ColorError::InvalidRange(_) => ErrorCode::InvalidArgument,
        }
    }
}

impl From<ColorError> for ErrorCode {
    fn from(e: ColorError) -> Self {
        e.code()
    }
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
