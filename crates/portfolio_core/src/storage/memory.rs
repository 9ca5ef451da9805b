//! In-memory key-value backend with an optional byte quota.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;

/// Volatile key-value store.
///
/// The quota counts key and value bytes across all slots, the way browser
/// storage reports quota exhaustion.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, Vec<u8>>,
    quota_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects writes once `limit` bytes are used.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(limit),
        }
    }

    /// Changes or clears the quota. Existing entries are kept.
    pub fn set_quota(&mut self, limit: Option<usize>) {
        self.quota_bytes = limit;
    }

    /// Total key + value bytes currently stored.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
        if let Some(limit) = self.quota_bytes {
            let replaced = self
                .entries
                .get(key)
                .map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
