use std::collections::HashMap;

use crate::backend::KeyValueStore;
use crate::error::{Result, StoreError};

/// In-memory key-value surface.
///
/// An optional quota bounds the total bytes across all keys; writes that would
/// exceed it are rejected and leave the previous value in place.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Total bytes currently stored (keys and values).
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let previous = self
                .entries
                .get(key)
                .map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - previous + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrites_previous_value() {
        let mut store = MemoryStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn quota_rejects_oversize_write_and_keeps_old_value() {
        let mut store = MemoryStore::with_quota(8);
        store.set("k", "1234").unwrap();
        let result = store.set("k", "123456789");
        assert!(matches!(result, Err(StoreError::QuotaExceeded { .. })));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("1234"));
        // Replacing a value only counts the difference.
        store.set("k", "1234567").unwrap();
    }
}
