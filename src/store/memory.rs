use crate::store::PreferenceStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// In-memory preference store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.lock().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PreferenceStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.lock() {
            Ok(values) => values.get(key).cloned(),
            Err(_) => {
                warn!(key, "Memory store lock poisoned on read");
                None
            }
        }
    }

    fn put_string(&self, key: &str, value: &str) -> bool {
        match self.values.lock() {
            Ok(mut values) => {
                values.insert(key.to_string(), value.to_string());
                true
            }
            Err(_) => {
                warn!(key, "Memory store lock poisoned on write");
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        match self.values.lock() {
            Ok(mut values) => values.remove(key).is_some(),
            Err(_) => {
                warn!(key, "Memory store lock poisoned on remove");
                false
            }
        }
    }
}
