//! Error types for collections

use thiserror::Error;

/// Misuse of a collection. Both variants indicate a programming error in
/// the caller rather than bad end-user input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CollectionError {
    /// A value or key failed the collection's admission check
    #[error("{collection} only accepts {expected}: {reason}")]
    InvalidInput {
        collection: &'static str,
        expected: &'static str,
        reason: String,
    },

    /// The element type has no accessor with this name
    #[error("Method {method} not found on items of type {type_name}")]
    MethodNotFound {
        method: String,
        type_name: &'static str,
    },
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
