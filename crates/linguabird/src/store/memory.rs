//! In-process key-value store.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::{KeyValueStore, StoreError};

/// Keeps values in a map; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    #[instrument(skip(self, value))]
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!(value_length = value.len(), "Storing value in memory");
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
