//! On-device key-value storage.
//!
//! The client store persists its preferences and snapshots through the
//! [`KeyValueStore`] trait. [`SqliteStore`] keeps values in the on-device
//! database; [`MemoryStore`] keeps them for the lifetime of the process.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::{kv_repo, Database};
use crate::error::StorageError;

/// Key under which the auto-persisted UI preferences live.
pub const PREFERENCES_KEY: &str = "talentflow-storage";

/// Key under which manually saved full-state snapshots live.
pub const SNAPSHOT_KEY: &str = "talentflow-state";

/// String-keyed, string-valued storage.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads `key` and decodes it as JSON.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get_item(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Decode {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and writes it under `key`.
pub fn set_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set_item(key, &raw)
}

/// Process-lifetime storage.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::LockPoisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::LockPoisoned)?;
        items.remove(key);
        Ok(())
    }
}

/// Storage backed by the on-device SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Opens (or creates) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self::new(Database::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(kv_repo::get(&self.db, key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(kv_repo::put(&self.db, key, value)?)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        kv_repo::delete(&self.db, key)?;
        Ok(())
    }
}
