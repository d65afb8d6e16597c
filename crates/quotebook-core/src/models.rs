//! Data models for Quotebook
//!
//! Defines the core data structures: Quote and FilterSelection.
//! A quote is validated once, when it is built, and is immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};

/// Persisted value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// A quote with its category
///
/// Both fields are guaranteed non-blank. Identity for merging is exact
/// `text` equality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawQuote")]
pub struct Quote {
    text: String,
    category: String,
}

/// Unvalidated wire shape of a quote
#[derive(Deserialize)]
struct RawQuote {
    text: String,
    category: String,
}

impl TryFrom<RawQuote> for Quote {
    type Error = QuoteError;

    fn try_from(raw: RawQuote) -> Result<Self, Self::Error> {
        Quote::new(raw.text, raw.category)
    }
}

impl Quote {
    /// Create a quote, trimming both fields
    ///
    /// Fails with [`QuoteError::Validation`] if either field is blank.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> QuoteResult<Self> {
        let text = text.into().trim().to_string();
        let category = category.into().trim().to_string();

        if text.is_empty() {
            return Err(QuoteError::validation("quote text must not be empty"));
        }
        if category.is_empty() {
            return Err(QuoteError::validation("quote category must not be empty"));
        }

        Ok(Self { text, category })
    }

    /// The quote text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The quote category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Try to build a quote from an arbitrary JSON value
    ///
    /// Returns `None` unless the value is an object with non-blank string
    /// `text` and `category` fields.
    pub fn from_json_value(value: &serde_json::Value) -> Option<Self> {
        let text = value.get("text")?.as_str()?;
        let category = value.get("category")?.as_str()?;
        Quote::new(text, category).ok()
    }
}

/// The category filter applied to the list view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterSelection {
    /// Show every quote
    #[default]
    All,
    /// Show only quotes in this category
    Category(String),
}

impl FilterSelection {
    /// Parse a stored or user-entered selection
    ///
    /// `all` (any case) and blank input mean [`FilterSelection::All`].
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_CATEGORIES) {
            FilterSelection::All
        } else {
            FilterSelection::Category(value.to_string())
        }
    }

    /// The persisted form of this selection
    pub fn as_str(&self) -> &str {
        match self {
            FilterSelection::All => ALL_CATEGORIES,
            FilterSelection::Category(name) => name,
        }
    }

    /// Whether a quote passes this filter
    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            FilterSelection::All => true,
            FilterSelection::Category(name) => quote.category() == name,
        }
    }
}

impl std::fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_new_trims() {
        let quote = Quote::new("  Stay hungry.  ", " Motivation ").unwrap();
        assert_eq!(quote.text(), "Stay hungry.");
        assert_eq!(quote.category(), "Motivation");
    }

    #[test]
    fn test_quote_rejects_blank_fields() {
        assert!(matches!(
            Quote::new("", "Life"),
            Err(QuoteError::Validation(_))
        ));
        assert!(matches!(
            Quote::new("Some text", "   "),
            Err(QuoteError::Validation(_))
        ));
    }

    #[test]
    fn test_quote_deserialize_validates() {
        let ok: Quote = serde_json::from_str(r#"{"text":"A","category":"B"}"#).unwrap();
        assert_eq!(ok.text(), "A");

        let blank = serde_json::from_str::<Quote>(r#"{"text":"","category":"B"}"#);
        assert!(blank.is_err());
    }

    #[test]
    fn test_from_json_value() {
        let value = serde_json::json!({"text": "A", "category": "B", "extra": 1});
        assert_eq!(
            Quote::from_json_value(&value),
            Some(Quote::new("A", "B").unwrap())
        );

        assert!(Quote::from_json_value(&serde_json::json!({"bad": 1})).is_none());
        assert!(Quote::from_json_value(&serde_json::json!({"text": 5, "category": "B"})).is_none());
        assert!(Quote::from_json_value(&serde_json::json!("text")).is_none());
    }

    #[test]
    fn test_filter_selection_parse() {
        assert_eq!(FilterSelection::parse("all"), FilterSelection::All);
        assert_eq!(FilterSelection::parse("ALL"), FilterSelection::All);
        assert_eq!(FilterSelection::parse(""), FilterSelection::All);
        assert_eq!(
            FilterSelection::parse("Life"),
            FilterSelection::Category("Life".to_string())
        );
    }

    #[test]
    fn test_filter_selection_matches() {
        let quote = Quote::new("A", "Life").unwrap();
        assert!(FilterSelection::All.matches(&quote));
        assert!(FilterSelection::Category("Life".into()).matches(&quote));
        assert!(!FilterSelection::Category("life".into()).matches(&quote));
    }

    #[test]
    fn test_filter_selection_display() {
        assert_eq!(FilterSelection::All.to_string(), "all");
        assert_eq!(FilterSelection::Category("Life".into()).to_string(), "Life");
    }
}
