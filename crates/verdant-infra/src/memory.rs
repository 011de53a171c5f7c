//! In-process key-value store.
//!
//! Backs ephemeral chat sessions: state lives for the life of the process
//! and is never written to disk.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use verdant_core::storage::kv_store::KvStore;
use verdant_types::error::RepositoryError;
use verdant_types::storage::KvEntry;

#[derive(Debug, Clone)]
struct Slot {
    value: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Map-backed implementation of `KvStore`. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    slots: Arc<RwLock<BTreeMap<String, Slot>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<String, Slot>>, RepositoryError> {
        self.slots.read().map_err(|_| RepositoryError::Connection)
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<String, Slot>>, RepositoryError> {
        self.slots.write().map_err(|_| RepositoryError::Connection)
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        Ok(self.read()?.get(key).map(|slot| slot.value.clone()))
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        let now = Utc::now();
        let mut slots = self.write()?;
        match slots.get_mut(key) {
            Some(slot) => {
                slot.value = value.clone();
                slot.updated_at = now;
            }
            None => {
                slots.insert(
                    key.to_string(),
                    Slot {
                        value: value.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.write()?.remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.read()?.keys().cloned().collect())
    }

    async fn get_entry(&self, key: &str) -> Result<Option<KvEntry>, RepositoryError> {
        Ok(self.read()?.get(key).map(|slot| KvEntry {
            key: key.to_string(),
            value: slot.value.clone(),
            created_at: slot.created_at,
            updated_at: slot.updated_at,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemoryKvStore::new();
        assert!(store.get("savedChats").await.unwrap().is_none());

        store.set("savedChats", &serde_json::json!([])).await.unwrap();
        assert_eq!(store.get("savedChats").await.unwrap(), Some(serde_json::json!([])));

        store.delete("savedChats").await.unwrap();
        assert!(store.get("savedChats").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryKvStore::new();
        let other = store.clone();
        store.set("k", &serde_json::json!(1)).await.unwrap();
        assert_eq!(other.get("k").await.unwrap(), Some(serde_json::json!(1)));
    }

    #[tokio::test]
    async fn test_list_keys_sorted_and_entry_timestamps() {
        let store = MemoryKvStore::new();
        store.set("b", &serde_json::json!(1)).await.unwrap();
        store.set("a", &serde_json::json!(2)).await.unwrap();
        assert_eq!(store.list_keys().await.unwrap(), vec!["a", "b"]);

        let first = store.get_entry("b").await.unwrap().unwrap();
        store.set("b", &serde_json::json!(3)).await.unwrap();
        let second = store.get_entry("b").await.unwrap().unwrap();
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.value, serde_json::json!(3));
    }
}
