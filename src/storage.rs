//! Local-storage-shaped persistence: string keys mapped to JSON string
//! values, one durable backend (a file per key under the data directory) and
//! one in-memory backend for tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub const CALENDAR_EVENTS_KEY: &str = "calendarEvents";
pub const CALENDAR_CONTENTS_KEY: &str = "calendarContents";
pub const POST_CONTENTS_KEY: &str = "postContents";
pub const DRAFT_POSTS_KEY: &str = "draftPosts";
pub const PUBLISHED_POSTS_KEY: &str = "publishedPosts";
pub const FAILED_POSTS_KEY: &str = "failedPosts";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("storage serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Read and parse a stored value, falling back to the default on a missing
/// entry, a read error, or unparseable JSON. Failures are logged, never
/// surfaced.
pub fn load_or_default<T, S>(storage: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: Storage + ?Sized,
{
    match storage.get_item(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Failed to parse {key}: {e}");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            log::error!("Failed to read {key}: {e}");
            T::default()
        }
    }
}

/// One `<key>.json` file per storage key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the backing directory and return the storage.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// HashMap-backed storage for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("calendarEvents").unwrap(), None);
        storage.set_item("calendarEvents", "{}").unwrap();
        assert_eq!(storage.get_item("calendarEvents").unwrap().as_deref(), Some("{}"));
        storage.remove_item("calendarEvents").unwrap();
        assert_eq!(storage.get_item("calendarEvents").unwrap(), None);
    }

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir().join(format!("postdeck-storage-{}", uuid::Uuid::new_v4()));
        let mut storage = FileStorage::open(&dir).unwrap();
        assert_eq!(storage.get_item("postContents").unwrap(), None);
        storage.set_item("postContents", "{\"a\":\"b\"}").unwrap();
        assert_eq!(
            storage.get_item("postContents").unwrap().as_deref(),
            Some("{\"a\":\"b\"}")
        );
        storage.remove_item("postContents").unwrap();
        storage.remove_item("postContents").unwrap();
        assert_eq!(storage.get_item("postContents").unwrap(), None);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_or_default_swallows_bad_json() {
        let mut storage = MemoryStorage::new();
        storage.set_item("draftPosts", "not json").unwrap();
        let posts: Vec<u32> = load_or_default(&storage, "draftPosts");
        assert!(posts.is_empty());
    }
}
