pub mod memory;
pub mod sqlite;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    contact::{Contact, default_contacts},
    types::CONTACTS_KEY,
};

/// Storage or encoding failure.
#[derive(Debug, Error)]
pub enum PersistError {
    /// SQLite backend error.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Stored blob is not a contact array.
    #[error("decode: {0}")]
    Serde(#[from] serde_json::Error),
    /// Any other backend failure.
    #[error("{0}")]
    Message(String),
}

/// Result alias for storage operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Platform key-value storage holding string values.
pub trait KeyValueStorage: Send {
    /// Value under `key`, `None` if never set.
    fn get(&self, key: &str) -> PersistResult<Option<String>>;
    /// Overwrites the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> PersistResult<()>;
}

/// Whole-collection persistence under one storage key.
///
/// Every mutation rewrites the full JSON array; there are no record-level
/// writes.
pub struct ContactRepository {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl ContactRepository {
    /// Repository under the default `"contacts"` key.
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, CONTACTS_KEY)
    }

    /// Repository under a custom key.
    pub fn with_key(storage: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored collection.
    ///
    /// A missing key or an empty value is a first run: the built-in defaults
    /// are returned when `seed_defaults` is set, an empty collection
    /// otherwise. Nothing is written back until the first mutation.
    pub fn load(&self, seed_defaults: bool) -> PersistResult<Vec<Contact>> {
        let stored = self.storage.get(&self.key)?;
        let Some(raw) = stored.filter(|raw| !raw.is_empty()) else {
            info!(key = %self.key, seed_defaults, "no stored contacts");
            return Ok(if seed_defaults {
                default_contacts()
            } else {
                Vec::new()
            });
        };
        let contacts: Vec<Contact> = serde_json::from_str(&raw)?;
        debug!(key = %self.key, count = contacts.len(), "loaded contacts");
        Ok(contacts)
    }

    /// Overwrites the stored blob with `contacts` as a JSON array.
    pub fn save_all(&mut self, contacts: &[Contact]) -> PersistResult<()> {
        let payload = serde_json::to_string(contacts)?;
        self.storage.set(&self.key, &payload)?;
        debug!(key = %self.key, count = contacts.len(), "saved contacts");
        Ok(())
    }

    /// Appends `contact` to `current` and writes the result.
    pub fn save_contact(
        &mut self,
        current: &[Contact],
        contact: Contact,
    ) -> PersistResult<Vec<Contact>> {
        let mut updated = current.to_vec();
        updated.push(contact);
        self.save_all(&updated)?;
        Ok(updated)
    }

    /// Filters `id` out of `current` and writes the result.
    pub fn delete_by_id(&mut self, current: &[Contact], id: &str) -> PersistResult<Vec<Contact>> {
        let updated: Vec<Contact> = current.iter().filter(|c| c.id != id).cloned().collect();
        self.save_all(&updated)?;
        Ok(updated)
    }
}
