//! Error types for message catalogs

use thiserror::Error;

/// Errors raised while loading or parsing message catalogs.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Invalid locale string
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// Message not found
    #[error("Message not found: {key} for locale {locale}")]
    MessageNotFound { key: String, locale: String },

    /// Catalog directory does not exist
    #[error("Catalog directory not found: {0}")]
    CatalogNotFound(String),

    /// Failed to parse message file
    #[error("Failed to parse message file: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}
