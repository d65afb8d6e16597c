//! The quote list
//!
//! `QuoteStore` owns the authoritative, ordered list of quotes. Every
//! mutation is followed by a full rewrite of the `quotes` key in persistent
//! storage before control returns to the caller.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = QuoteStore::load(&storage);   // seed list on first run
//! store.append(Quote::new("X", "Y")?, &mut storage);
//! ```

use tracing::{debug, warn};

use crate::error::QuoteResult;
use crate::models::Quote;
use crate::storage::{KeyValueStore, StorageResult, QUOTES_KEY};

/// Quotes used when nothing usable has been stored yet
const SEED_QUOTES: [(&str, &str); 3] = [
    (
        "The best way to get started is to quit talking and begin doing.",
        "Motivation",
    ),
    (
        "Life is what happens when you're busy making other plans.",
        "Life",
    ),
    (
        "In the middle of every difficulty lies opportunity.",
        "Inspiration",
    ),
];

/// The fixed default list
pub fn seed_quotes() -> Vec<Quote> {
    SEED_QUOTES
        .iter()
        .filter_map(|(text, category)| Quote::new(*text, *category).ok())
        .collect()
}

/// Owned, ordered list of quotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

impl QuoteStore {
    /// Create a store over an explicit list (not persisted until mutated)
    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// Load the list from persistent storage
    ///
    /// Falls back to the seed list when the key is missing, unreadable, not
    /// JSON, or not an array. Entries that fail validation are dropped.
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        let stored = match storage.get(QUOTES_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read stored quotes, using seed list: {}", e);
                None
            }
        };

        let Some(raw) = stored else {
            debug!("No stored quotes, using seed list");
            return Self::from_quotes(seed_quotes());
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Array(entries)) => {
                let quotes: Vec<Quote> = entries.iter().filter_map(Quote::from_json_value).collect();
                if quotes.len() < entries.len() {
                    warn!(
                        "Dropped {} invalid stored quote(s)",
                        entries.len() - quotes.len()
                    );
                }
                Self::from_quotes(quotes)
            }
            Ok(_) | Err(_) => {
                debug!("Stored quotes are malformed, using seed list");
                Self::from_quotes(seed_quotes())
            }
        }
    }

    /// Write the full list to persistent storage
    ///
    /// Failures are logged, never returned: the list keeps working in memory.
    pub fn save(&self, storage: &mut dyn KeyValueStore) {
        if let Err(e) = self.try_save(storage) {
            warn!("Failed to save quotes: {}", e);
        }
    }

    fn try_save(&self, storage: &mut dyn KeyValueStore) -> StorageResult<()> {
        let json = serde_json::to_string(&self.quotes)?;
        storage.set(QUOTES_KEY, &json)
    }

    /// Validate and append a manually entered quote
    ///
    /// Fails with [`crate::QuoteError::Validation`] on blank text or
    /// category, leaving the list untouched.
    pub fn add(
        &mut self,
        text: &str,
        category: &str,
        storage: &mut dyn KeyValueStore,
    ) -> QuoteResult<Quote> {
        let quote = Quote::new(text, category)?;
        self.append(quote.clone(), storage);
        Ok(quote)
    }

    /// Append a validated quote and persist
    pub fn append(&mut self, quote: Quote, storage: &mut dyn KeyValueStore) {
        debug!("Appending quote in category {:?}", quote.category());
        self.quotes.push(quote);
        self.save(storage);
    }

    /// Append a batch in order and persist once
    ///
    /// An empty batch is a no-op and does not touch storage.
    pub fn extend(&mut self, quotes: Vec<Quote>, storage: &mut dyn KeyValueStore) {
        if quotes.is_empty() {
            return;
        }
        debug!("Appending {} quote(s)", quotes.len());
        self.quotes.extend(quotes);
        self.save(storage);
    }

    /// All quotes in insertion order
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Quote at an index
    pub fn get(&self, index: usize) -> Option<&Quote> {
        self.quotes.get(index)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage, StorageError};
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Storage whose writes always fail
    struct FullDisk;

    impl KeyValueStore for FullDisk {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::DiskFull {
                path: PathBuf::from("/full"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "No space left on device"),
            })
        }

        fn remove(&mut self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    fn quote(text: &str, category: &str) -> Quote {
        Quote::new(text, category).unwrap()
    }

    #[test]
    fn test_load_empty_storage_uses_seed() {
        let storage = MemoryStorage::new();
        let store = QuoteStore::load(&storage);

        assert_eq!(store.len(), 3);
        assert_eq!(store.quotes(), seed_quotes().as_slice());
        assert_eq!(store.get(1).unwrap().category(), "Life");
    }

    #[test]
    fn test_load_malformed_uses_seed() {
        let mut storage = MemoryStorage::new();

        storage.set(QUOTES_KEY, "{not json").unwrap();
        assert_eq!(QuoteStore::load(&storage).len(), 3);

        storage.set(QUOTES_KEY, r#"{"text":"A","category":"B"}"#).unwrap();
        assert_eq!(QuoteStore::load(&storage).quotes(), seed_quotes().as_slice());
    }

    #[test]
    fn test_load_stored_array() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                QUOTES_KEY,
                r#"[{"text":"A","category":"B"},{"text":"","category":"B"},{"text":"C","category":"D"}]"#,
            )
            .unwrap();

        let store = QuoteStore::load(&storage);
        assert_eq!(store.quotes(), &[quote("A", "B"), quote("C", "D")]);
    }

    #[test]
    fn test_load_empty_array_is_kept() {
        let mut storage = MemoryStorage::new();
        storage.set(QUOTES_KEY, "[]").unwrap();

        assert!(QuoteStore::load(&storage).is_empty());
    }

    #[test]
    fn test_append_persists_full_list() {
        let mut storage = MemoryStorage::new();
        let mut store = QuoteStore::load(&storage);

        store.append(quote("X", "Y"), &mut storage);

        assert_eq!(store.len(), 4);
        let reloaded = QuoteStore::load(&storage);
        assert_eq!(reloaded, store);
        assert_eq!(reloaded.get(3).unwrap().text(), "X");
    }

    #[test]
    fn test_add_rejects_blank_without_mutation() {
        let mut storage = MemoryStorage::new();
        let mut store = QuoteStore::load(&storage);

        let err = store.add("", "Y", &mut storage).unwrap_err();
        assert!(matches!(err, crate::QuoteError::Validation(_)));
        let err = store.add("X", "  ", &mut storage).unwrap_err();
        assert!(matches!(err, crate::QuoteError::Validation(_)));

        assert_eq!(store.len(), 3);
        assert!(storage.get(QUOTES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_add_valid_quote() {
        let mut storage = MemoryStorage::new();
        let mut store = QuoteStore::load(&storage);

        let added = store.add(" X ", "Y", &mut storage).unwrap();
        assert_eq!(added.text(), "X");
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_extend_empty_batch_does_not_write() {
        let mut storage = MemoryStorage::new();
        let mut store = QuoteStore::load(&storage);

        store.extend(Vec::new(), &mut storage);

        assert!(storage.get(QUOTES_KEY).unwrap().is_none());
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let mut storage = FullDisk;
        let mut store = QuoteStore::load(&storage);

        store.append(quote("X", "Y"), &mut storage);

        assert_eq!(store.len(), 4);
        assert_eq!(store.quotes()[3].text(), "X");
    }

    #[test]
    fn test_persists_across_file_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        {
            let mut storage = FileStorage::open(&path).unwrap();
            let mut store = QuoteStore::load(&storage);
            store.extend(vec![quote("A", "B"), quote("C", "D")], &mut storage);
        }

        let storage = FileStorage::open(&path).unwrap();
        let store = QuoteStore::load(&storage);
        assert_eq!(store.len(), 5);
        assert_eq!(store.get(4).unwrap().text(), "C");
    }
}
