//! Error types for the moving sum transform.

use thiserror::Error;

/// Errors raised while validating a moving sum call.
///
/// Every variant is produced before any output is written, so an in-place
/// call that fails leaves its input untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MsumError {
    /// An argument has the wrong shape or type.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The window is longer than the input sequence.
    #[error("window of {window} exceeds input length {len}")]
    WindowTooLarge { window: usize, len: usize },
}

impl MsumError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        MsumError::InvalidArgument(msg.into())
    }

    /// Whether this is the range class of error (window larger than input).
    pub fn is_range_error(&self) -> bool {
        matches!(self, MsumError::WindowTooLarge { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MsumError>;
