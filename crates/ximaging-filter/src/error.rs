//! Error types for ximaging-filter

use thiserror::Error;
use ximaging_core::ErrorCode;

/// Errors that can occur during filtering operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ximaging_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),
}

impl FilterError {
    /// Numeric status code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            FilterError::Core(e) => e.code(),
            FilterError::InvalidKernel(_) => ErrorCode::InvalidArgument,
        }
    }
}

impl From<FilterError> for ErrorCode {
    fn from(e: FilterError) -> Self {
        e.code()
    }
}

/// Result type for filtering operations
pub type FilterResult<T> = Result<T, FilterError>;
