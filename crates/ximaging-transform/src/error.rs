//! Error types for ximaging-transform

use thiserror::Error;
use ximaging_core::ErrorCode;

/// Errors that can occur during geometric transformations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ximaging_core::Error),

    /// Rotation angle is NaN or infinite
    #[error("invalid rotation angle: {0}")]
    InvalidAngle(f32),
}

impl TransformError {
    /// Numeric status code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TransformError::Core(e) => e.code(),
            TransformError::InvalidAngle(_) => ErrorCode::InvalidArgument,
        }
    }
}

impl From<TransformError> for ErrorCode {
    fn from(e: TransformError) -> Self {
        e.code()
    }
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
