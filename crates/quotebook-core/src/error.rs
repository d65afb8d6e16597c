//! Error types for quote operations

use thiserror::Error;

use crate::storage::StorageError;

/// Result type alias for quote operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Errors surfaced by the quote book
///
/// `Validation`, `Format` and `Schema` are returned to the user at the point
/// of the action. `Storage` and `Network` are logged and swallowed by the
/// components that hit them; they only reach callers through explicit
/// operations such as [`crate::sync::RemoteQuotes`].
#[derive(Error, Debug)]
pub enum QuoteError {
    /// A quote with blank text or category was rejected
    #[error("Invalid quote: {0}")]
    Validation(String),

    /// Import payload is not parseable JSON
    #[error("Import failed: not valid JSON ({0})")]
    Format(#[source] serde_json::Error),

    /// Import payload parsed, but the top level is not an array
    #[error("Import failed: expected a JSON array of quotes, found {found}")]
    Schema { found: &'static str },

    /// Persistence read or write failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Remote fetch or push failure
    #[error("Network error: {0}")]
    Network(String),
}

impl QuoteError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(error: reqwest::Error) -> Self {
        QuoteError::Network(error.to_string())
    }
}
