use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::persist::StateStorage;

/// In-memory StateStorage for testing and the native session scope.
///
/// Clones share the same map, so a test can keep a handle and inspect what a
/// store wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_items() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set_item("a", "1");
        assert_eq!(other.get_item("a").as_deref(), Some("1"));

        other.remove_item("a");
        assert!(storage.get_item("a").is_none());
    }
}
