//! File-backed persistent storage
//!
//! All keys live in a single JSON object file. Every write rewrites the
//! whole file atomically (write to temp file, sync, then rename) so a crash
//! never leaves it half-written.
//!
//! Storage location: `~/.local/share/quotebook/storage.json` (configurable
//! via `Config`)

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError, StorageResult, StorageStats};

/// Persistent key-value storage backed by a JSON file
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
    recovered: Option<StorageError>,
}

impl FileStorage {
    /// Open the storage file, creating nothing until the first write
    ///
    /// A file that cannot be parsed is moved aside to `<file>.corrupt` and
    /// storage starts out empty. If the move fails too, storage still starts
    /// empty and the next write replaces the file. Either way the problem is
    /// kept for [`FileStorage::take_recovery_notice`].
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let mut recovered = None;

        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    let err = match backup_corrupt_file(&path) {
                        Ok(backup_path) => StorageError::CorruptStorage {
                            path: path.clone(),
                            backup_path,
                            details: e.to_string(),
                        },
                        Err(backup_err) => backup_err,
                    };
                    warn!("Starting with empty storage: {}", err);
                    recovered = Some(err);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::from_read(e, path)),
        };

        debug!("Opened storage {:?} ({} keys)", path, values.len());
        Ok(Self {
            path,
            values,
            recovered,
        })
    }

    /// The problem recovered from while opening, if any (returned once)
    pub fn take_recovery_notice(&mut self) -> Option<StorageError> {
        self.recovered.take()
    }

    /// Check if the backing file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Size of the backing file in bytes (0 if not yet written)
    pub fn size_bytes(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    fn flush(&self) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(&self.values)?;
        atomic_write(&self.path, content.as_bytes())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let previous = self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Keep memory and disk in step when the write fails
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn stats(&self) -> StorageStats {
        StorageStats {
            path: Some(self.path.clone()),
            exists: self.exists(),
            size_bytes: self.size_bytes(),
        }
    }
}

/// Move an unreadable storage file aside, returning the backup path
fn backup_corrupt_file(path: &Path) -> StorageResult<PathBuf> {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".corrupt");
    let backup_path = PathBuf::from(backup);

    fs::rename(path, &backup_path).map_err(|e| StorageError::AtomicWriteFailed {
        from: path.to_path_buf(),
        to: backup_path.clone(),
        source: e,
    })?;

    Ok(backup_path)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
