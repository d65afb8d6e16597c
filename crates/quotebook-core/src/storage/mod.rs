//! Storage layer
//!
//! Key-value storage for the quote book, modelled on browser storage:
//! string keys mapping to string values.
//!
//! ## Backends
//!
//! - **FileStorage**: Persistent, a JSON object file written atomically
//! - **MemoryStorage**: Session-scoped, lives as long as the process

use std::path::PathBuf;

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key holding the serialized quote list (persistent)
pub const QUOTES_KEY: &str = "quotes";

/// Key holding the last selected category filter (persistent)
pub const SELECTED_CATEGORY_KEY: &str = "lastSelectedCategory";

/// Key holding the index of the last randomly shown quote (session)
pub const LAST_VIEWED_KEY: &str = "lastViewedQuoteIndex";

/// Where a backend keeps its data and how much
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorageStats {
    /// Backing file, `None` for in-memory storage
    pub path: Option<PathBuf>,
    /// Whether the backing file has been written yet
    pub exists: bool,
    /// Size of the backing file in bytes
    pub size_bytes: u64,
}

impl StorageStats {
    /// Whether data survives the process
    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    /// Size formatted for people
    pub fn size_human(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;

        if self.size_bytes >= MB {
            format!("{:.1} MB", self.size_bytes as f64 / MB as f64)
        } else if self.size_bytes >= KB {
            format!("{:.1} KB", self.size_bytes as f64 / KB as f64)
        } else {
            format!("{} bytes", self.size_bytes)
        }
    }
}

/// String key-value storage
pub trait KeyValueStore: Send {
    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key if present
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Location and size of the stored data
    fn stats(&self) -> StorageStats {
        StorageStats::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_human() {
        let stats = |size_bytes| StorageStats {
            size_bytes,
            ..StorageStats::default()
        };

        assert_eq!(stats(512).size_human(), "512 bytes");
        assert_eq!(stats(2048).size_human(), "2.0 KB");
        assert_eq!(stats(3 * 1024 * 1024).size_human(), "3.0 MB");
    }

    #[test]
    fn test_memory_storage_is_not_persistent() {
        assert!(!MemoryStorage::new().stats().is_persistent());
    }
}
