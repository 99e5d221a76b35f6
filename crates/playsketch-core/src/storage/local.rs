//! `window.localStorage` backend for WebAssembly.

use super::{Storage, StorageError, StorageResult};

/// Browser local storage. Keys are shared with anything else on the origin.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {e:?}")))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))?;
        Ok(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        // Fails when the quota is exceeded.
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Io(format!("Failed to write {key}: {e:?}")))
    }

    fn load(&self, key: &str) -> StorageResult<String> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to read {key}: {e:?}")))?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner
            .remove_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to delete {key}: {e:?}")))
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let len = self
            .inner
            .length()
            .map_err(|e| StorageError::Io(format!("Failed to list keys: {e:?}")))?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Ok(Some(key)) = self.inner.key(index) {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner
            .get_item(key)
            .map(|item| item.is_some())
            .map_err(|e| StorageError::Io(format!("Failed to read {key}: {e:?}")))
    }
}
