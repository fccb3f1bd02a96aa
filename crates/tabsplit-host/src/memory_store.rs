//! In-memory `KeyValueStore`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tabsplit_common::HostError;
use tracing::debug;

use super::{KeyValueStore, Result, StorageArea};

/// Two independent maps, one per storage area. Last write wins.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(StorageArea, String), serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held in `area`.
    pub fn len(&self, area: StorageArea) -> usize {
        self.entries
            .lock()
            .map(|m| m.keys().filter(|(a, _)| *a == area).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, area: StorageArea) -> bool {
        self.len(area) == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, area: StorageArea, key: &str) -> Result<Option<serde_json::Value>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| HostError::StorageError(format!("store lock poisoned: {e}")))?;
        Ok(entries.get(&(area, key.to_string())).cloned())
    }

    async fn set(&self, area: StorageArea, key: &str, value: serde_json::Value) -> Result<()> {
        debug!(?area, key, "storage set");
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| HostError::StorageError(format!("store lock poisoned: {e}")))?;
        entries.insert((area, key.to_string()), value);
        Ok(())
    }
}
