//! In-memory storage.

use std::sync::{Mutex, MutexGuard};

use rustc_hash::FxHashMap;

use super::{Storage, StorageError};

/// Storage backed by a process-local map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, FxHashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|error| StorageError::Unavailable(error.to_string()))
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);

        Ok(())
    }
}
