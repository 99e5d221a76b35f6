//! Storage abstraction for persistence.
//!
//! Backends are plain string key-value stores. The playbook is kept as a
//! JSON array of plays under [`PLAYBOOK_KEY`].

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::document::{Playbook, plays_from_value};
use serde_json::Value;
use thiserror::Error;

/// Key under which the playbook is stored.
pub const PLAYBOOK_KEY: &str = "playsketch.plays";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Entry not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for key-value storage backends.
///
/// On native platforms implementations must be Send + Sync.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Read the value stored under `key`.
    fn load(&self, key: &str) -> StorageResult<String>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Trait for key-value storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Read the value stored under `key`.
    fn load(&self, key: &str) -> StorageResult<String>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Persist the plays of `playbook` under [`PLAYBOOK_KEY`].
pub fn save_playbook(storage: &dyn Storage, playbook: &Playbook) -> StorageResult<()> {
    let json = playbook
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    storage.save(PLAYBOOK_KEY, &json)
}

/// Load the stored playbook.
///
/// Never fails: a missing entry, unreadable JSON or a top level that is not
/// an array of plays yields a fresh default playbook.
pub fn load_playbook(storage: &dyn Storage) -> Playbook {
    let json = match storage.load(PLAYBOOK_KEY) {
        Ok(json) => json,
        Err(StorageError::NotFound(_)) => {
            log::info!("No stored playbook, starting fresh");
            return Playbook::default();
        }
        Err(e) => {
            log::warn!("Failed to read stored playbook: {e}");
            return Playbook::default();
        }
    };

    let plays = serde_json::from_str::<Value>(&json)
        .map_err(|e| e.to_string())
        .and_then(|value| plays_from_value(&value).map_err(|e| e.to_string()));
    match plays {
        Ok(plays) => {
            log::info!("Loaded {} stored plays", plays.len());
            Playbook::from_plays(plays)
        }
        Err(e) => {
            log::warn!("Ignoring stored playbook: {e}");
            Playbook::default()
        }
    }
}
