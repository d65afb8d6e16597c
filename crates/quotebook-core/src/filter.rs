//! Category filter state
//!
//! The selected category is the one piece of view state that survives a
//! restart on its own. The category set itself is never stored; it is
//! derived from the quote list on every call.

use tracing::warn;

use crate::models::{FilterSelection, Quote};
use crate::storage::{KeyValueStore, SELECTED_CATEGORY_KEY};

/// Tracks the last selected category filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    selection: FilterSelection,
}

impl FilterState {
    /// Read the persisted selection, defaulting to [`FilterSelection::All`]
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        let selection = match storage.get(SELECTED_CATEGORY_KEY) {
            Ok(Some(value)) => FilterSelection::parse(&value),
            Ok(None) => FilterSelection::All,
            Err(e) => {
                warn!("Failed to read selected category: {}", e);
                FilterSelection::All
            }
        };
        Self { selection }
    }

    /// Distinct categories in order of first appearance
    pub fn categories(quotes: &[Quote]) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for quote in quotes {
            if !categories.iter().any(|c| c == quote.category()) {
                categories.push(quote.category().to_string());
            }
        }
        categories
    }

    /// The current selection
    pub fn current_selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Change the selection and persist it immediately
    ///
    /// A write failure is logged; the in-memory selection still changes.
    pub fn set_selection(&mut self, selection: FilterSelection, storage: &mut dyn KeyValueStore) {
        if let Err(e) = storage.set(SELECTED_CATEGORY_KEY, selection.as_str()) {
            warn!("Failed to save selected category: {}", e);
        }
        self.selection = selection;
    }

    /// Whether the selection names a category present in the list
    ///
    /// Always true for [`FilterSelection::All`]. A stale category is not an
    /// error; it just filters down to nothing.
    pub fn is_available(&self, quotes: &[Quote]) -> bool {
        match &self.selection {
            FilterSelection::All => true,
            FilterSelection::Category(name) => quotes.iter().any(|q| q.category() == name),
        }
    }
}
