use serde::de::DeserializeOwned;
use serde::Serialize;

use super::kv::KeyValueStore;
use crate::error::StorageError;

/// Serializes whole collections to JSON text under a single key.
pub struct StorageAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write `collection` as a JSON array, replacing the previous value.
    pub fn save<T: Serialize>(&self, key: &str, collection: &[T]) -> Result<(), StorageError> {
        let text = serde_json::to_string(collection).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &text)?;
        tracing::debug!(key, records = collection.len(), "saved collection");
        Ok(())
    }

    /// Read the collection under `key`. An absent key is an empty collection;
    /// text that does not parse is reported as [`StorageError::Malformed`].
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        let Some(text) = self.store.get(key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&text).map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })
    }

    /// Like [`load`](Self::load), but any failure is logged and read as an
    /// empty collection.
    pub fn load_or_empty<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.load(key) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding unreadable collection");
                Vec::new()
            }
        }
    }
}
