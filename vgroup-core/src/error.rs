//! Core error types.

use thiserror::Error;

/// Errors from building a transformer.
///
/// Malformed groups in the input are never reported here; they are passed
/// through as literal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("delimiter collision: {first} and {second} are both '{ch}'")]
    DelimiterCollision {
        first: &'static str,
        second: &'static str,
        ch: char,
    },

    #[error("reserved delimiter: {name} cannot be {ch:?}, it is a token-breaking character")]
    ReservedDelimiter { name: &'static str, ch: char },
}

impl CoreError {
    /// Returns a stable error code suitable for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::DelimiterCollision { .. } => "DELIMITER_COLLISION",
            CoreError::ReservedDelimiter { .. } => "RESERVED_DELIMITER",
        }
    }
}
