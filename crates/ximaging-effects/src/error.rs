//! Error types for ximaging-effects

use thiserror::Error;
use ximaging_core::ErrorCode;

/// Errors that can occur during effect and texture operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EffectsError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ximaging_core::Error),

    /// Malformed threshold matrix
    #[error("invalid threshold matrix: {0}")]
    InvalidMatrix(String),
}

impl EffectsError {
    /// Numeric status code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EffectsError::Core(e) => e.code(),
            EffectsError::InvalidMatrix(_) => ErrorCode::InvalidArgument,
        }
    }
}

impl From<EffectsError> for ErrorCode {
    fn from(e: EffectsError) -> Self {
        e.code()
    }
}

/// Result type for effect operations
pub type EffectsResult<T> = Result<T, EffectsError>;
