use super::store::{KvStore, StoreError};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// In-process key/value store.
///
/// Backed by a sharded `DashMap`, so concurrent writers to distinct keys and
/// concurrent readers never contend on a global lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(_) => Err(StoreError::KeyExists(key.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(value);
                tracing::debug!("Stored key {} locally", key);
                Ok(())
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .entries
            .iter()
            .map(|entry| entry.key().clone())
            .collect())
    }
}
