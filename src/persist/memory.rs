//! In-process key-value storage.

use std::sync::{Arc, Mutex};

use hashbrown::HashMap;

use super::{KeyValueStorage, PersistError, PersistResult};

/// Shared in-memory map; clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| PersistError::Message("memory storage poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PersistError::Message("memory storage poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
