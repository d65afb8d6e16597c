//! JSON import and export
//!
//! The exchange format is a pretty-printed JSON array of
//! `{"text": ..., "category": ...}` objects. Import is lenient about
//! individual entries (bad ones are dropped) but strict about the top level,
//! which must be an array.

use serde_json::Value;

use crate::error::{QuoteError, QuoteResult};
use crate::models::Quote;

/// Default file name for exported documents
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Validated contents of an import document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    /// Entries that passed validation, in document order
    pub quotes: Vec<Quote>,
    /// Number of entries dropped as invalid
    pub skipped: usize,
}

impl ImportResult {
    /// True when the document held nothing importable
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Serialize quotes as a pretty-printed JSON array
pub fn export_document(quotes: &[Quote]) -> QuoteResult<String> {
    serde_json::to_string_pretty(quotes).map_err(QuoteError::Format)
}

/// Parse and validate an import document
///
/// Fails with [`QuoteError::Format`] when `raw` is not JSON and
/// [`QuoteError::Schema`] when the top level is not an array.
pub fn parse_document(raw: &str) -> QuoteResult<ImportResult> {
    let value: Value = serde_json::from_str(raw).map_err(QuoteError::Format)?;

    let Value::Array(entries) = value else {
        return Err(QuoteError::Schema {
            found: json_kind(&value),
        });
    };

    let quotes: Vec<Quote> = entries.iter().filter_map(Quote::from_json_value).collect();
    let skipped = entries.len() - quotes.len();

    Ok(ImportResult { quotes, skipped })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
