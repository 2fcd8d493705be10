use std::time::{SystemTime, UNIX_EPOCH};

use hashbrown::HashMap;
use thiserror::Error;
use tracing::warn;

use crate::{
    contact::{Contact, ContactDraft},
    types::{ContactId, TimestampMs},
};

/// Rejected collection edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with this id is already present.
    #[error("contact {0} already exists")]
    AlreadyExists(ContactId),
}

/// Authoritative in-memory collection in insertion order.
#[derive(Debug, Default, Clone)]
pub struct ContactStore {
    records: HashMap<ContactId, Contact>,
    order: Vec<ContactId>,
    pos: HashMap<ContactId, usize>,
    last_id_ms: TimestampMs,
}

impl ContactStore {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection seeded from loaded records, in order.
    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        let mut store = Self::new();
        store.replace_all(contacts);
        store
    }

    /// Swaps in a whole collection, e.g. after a load or a rollback.
    pub fn replace_all(&mut self, contacts: Vec<Contact>) {
        let last_id_ms = self.last_id_ms;
        *self = Self {
            last_id_ms,
            ..Self::default()
        };
        for contact in contacts {
            let id = contact.id.clone();
            if let Err(err) = self.insert_record(contact) {
                warn!(%id, %err, "dropping duplicate contact from collection");
            }
        }
    }

    /// Assigns a fresh id to `draft` and appends it.
    pub fn insert(&mut self, draft: ContactDraft, now_ms: TimestampMs) -> Contact {
        let id = self.next_id(now_ms);
        let contact = draft.into_contact(id);
        self.append(contact.clone());
        contact
    }

    /// Appends an existing record, keeping its id.
    pub fn insert_record(&mut self, contact: Contact) -> Result<(), StoreError> {
        if self.records.contains_key(&contact.id) {
            return Err(StoreError::AlreadyExists(contact.id));
        }
        if let Ok(ms) = contact.id.parse::<TimestampMs>() {
            self.last_id_ms = self.last_id_ms.max(ms);
        }
        self.append(contact);
        Ok(())
    }

    /// Removes the record with `id`, shifting later positions down.
    pub fn remove(&mut self, id: &str) -> Option<Contact> {
        let idx = self.pos.remove(id)?;
        self.order.remove(idx);
        for (offset, moved) in self.order[idx..].iter().enumerate() {
            self.pos.insert(moved.clone(), idx + offset);
        }
        self.records.remove(id)
    }

    /// Record with `id`.
    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.records.get(id)
    }

    /// Whether `id` is present.
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when there are no records.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Contact> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Leading `n` contacts; `n` past the end yields the whole collection.
    pub fn window(&self, n: usize) -> Vec<&Contact> {
        let end = n.min(self.order.len());
        self.order[..end]
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// Owned copy of [`ContactStore::window`].
    pub fn window_cloned(&self, n: usize) -> Vec<Contact> {
        self.window(n).into_iter().cloned().collect()
    }

    /// Owned copy of the whole collection.
    pub fn to_vec(&self) -> Vec<Contact> {
        self.iter().cloned().collect()
    }

    fn append(&mut self, contact: Contact) {
        self.pos.insert(contact.id.clone(), self.order.len());
        self.order.push(contact.id.clone());
        self.records.insert(contact.id.clone(), contact);
    }

    fn next_id(&mut self, now_ms: TimestampMs) -> ContactId {
        let ms = now_ms.max(self.last_id_ms.saturating_add(1));
        self.last_id_ms = ms;
        ms.to_string()
    }
}

/// Wall clock in milliseconds since the Unix epoch; 0 if the clock is before it.
pub fn now_ms() -> TimestampMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as TimestampMs)
        .unwrap_or(0)
}
