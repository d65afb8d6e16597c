//! In-memory storage for session-scoped values

use std::collections::HashMap;

use super::{KeyValueStore, StorageResult};

/// Storage that is discarded when the session ends
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get("key").unwrap().is_none());

        storage.set("key", "1").unwrap();
        storage.set("key", "2").unwrap();
        assert_eq!(storage.get("key").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.len(), 1);

        storage.remove("key").unwrap();
        assert!(storage.is_empty());
    }
}
