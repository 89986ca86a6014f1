//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression test inputs
#[derive(Debug, Error)]
pub enum TestError {
    /// Building a synthetic image failed
    #[error("failed to build test image: {0}")]
    Build(#[from] ximaging_core::Error),

    /// Builder parameters make no sense
    #[error("invalid test image parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
