//! Error types for core value objects

use thiserror::Error;

/// Errors raised when building core value objects.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// Input is not a well-formed email address
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// A field bag can only be built from a JSON object
    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}
