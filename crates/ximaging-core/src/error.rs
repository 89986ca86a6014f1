//! Error types for ximaging-core
//!
//! Provides the error taxonomy shared by every kernel in the workspace.
//! Domain crates wrap [`Error`] in their own error enums, so a caller always
//! gets one of the variants below (or a crate-specific refinement of
//! `InvalidArgument`).
//!
//! Kernels validate all preconditions before touching any output buffer, so an
//! `Err` return always means no pixel was modified.

use crate::format::PixelFormat;
use thiserror::Error;

/// ximaging error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Required input is missing or empty
    #[error("null or empty parameter: {0}")]
    NullParameter(&'static str),

    /// Pixel format not handled by this operation
    #[error("unsupported pixel format: {0:?}")]
    UnsupportedPixelFormat(PixelFormat),

    /// Two images (or source and destination) disagree in size or format
    #[error("image parameters mismatch: {0}")]
    ImageParametersMismatch(String),

    /// Parameter value is not acceptable
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Parameter value lies outside its documented range
    #[error("argument out of range: {name} = {value} (allowed {min}..={max})")]
    ArgumentOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Image is smaller than the operation's working window
    #[error("image is too small: {width}x{height}, need at least {min_width}x{min_height}")]
    ImageIsTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    /// Image dimensions are not usable (zero width or height, overflow)
    #[error("invalid image size: {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    /// Caller supplied scratch buffer is too small
    #[error("buffer too small: {required} elements required, {provided} provided")]
    TooSmallBuffer { required: usize, provided: usize },

    /// Internal scratch allocation failed
    #[error("out of memory")]
    OutOfMemory,
}

impl Error {
    /// Shorthand for [`Error::ArgumentOutOfRange`].
    pub fn out_of_range(name: &'static str, value: impl Into<f64>, min: impl Into<f64>, max: impl Into<f64>) -> Self {
        Error::ArgumentOutOfRange {
            name,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    /// Numeric status code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::NullParameter(_) => ErrorCode::NullParameter,
            Error::UnsupportedPixelFormat(_) => ErrorCode::UnsupportedPixelFormat,
            Error::ImageParametersMismatch(_) => ErrorCode::ImageParametersMismatch,
            Error::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Error::ArgumentOutOfRange { .. } => ErrorCode::ArgumentOutOfRange,
            Error::ImageIsTooSmall { .. } => ErrorCode::ImageIsTooSmall,
            Error::InvalidImageSize { .. } => ErrorCode::InvalidImageSize,
            Error::TooSmallBuffer { .. } => ErrorCode::TooSmallBuffer,
            Error::OutOfMemory => ErrorCode::OutOfMemory,
        }
    }
}

/// Fixed integer status codes for callers that speak in return codes
/// (plugin wrappers, FFI shims).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    NullParameter = 1,
    UnsupportedPixelFormat = 2,
    ImageParametersMismatch = 3,
    InvalidArgument = 4,
    ArgumentOutOfRange = 5,
    ImageIsTooSmall = 6,
    InvalidImageSize = 7,
    TooSmallBuffer = 8,
    OutOfMemory = 9,
}

impl ErrorCode {
    /// Status code for a kernel result.
    pub fn of<T, E: Into<ErrorCode> + Clone>(result: &std::result::Result<T, E>) -> Self {
        match result {
            Ok(_) => ErrorCode::Success,
            Err(e) => e.clone().into(),
        }
    }
}

impl From<Error> for ErrorCode {
    fn from(e: Error) -> Self {
        e.code()
    }
}

/// Result type alias for ximaging operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(Error::OutOfMemory.code() as i32, 9);
        assert_eq!(
            Error::TooSmallBuffer {
                required: 10,
                provided: 3
            }
            .code(),
            ErrorCode::TooSmallBuffer
        );
    }

    #[test]
    fn test_code_of_result() {
        let ok: Result<()> = Ok(());
        assert_eq!(ErrorCode::of(&ok), ErrorCode::Success);
        let err: Result<()> = Err(Error::NullParameter("kernel"));
        assert_eq!(ErrorCode::of(&err), ErrorCode::NullParameter);
    }

    #[test]
    fn test_out_of_range_message() {
        let e = Error::out_of_range("radius", 30, 1, 20);
        assert_eq!(
            e.to_string(),
            "argument out of range: radius = 30 (allowed 1..=20)"
        );
    }
}
