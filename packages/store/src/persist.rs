//! # Persisted state containers
//!
//! Client state (sidebar open/closed, search term and results) lives in explicit
//! containers that are handed to the UI layer, instead of ambient globals. Each
//! container is a [`PersistedStore`] bound to one key of a [`StateStorage`]
//! backend: it loads once on construction and writes back on every change.
//!
//! ## [`StateStorage`] trait
//!
//! A synchronous key/value interface shaped like the browser's Web Storage API.
//! Implementations live in sibling modules:
//!
//! | Backend | Module | Used for |
//! |---------|--------|----------|
//! | [`crate::MemoryStorage`] | `memory` | tests, session scope on native |
//! | [`crate::FileStorage`] | `file_store` | durable scope on native |
//! | `WebStorage` | `web_storage` | `localStorage` / `sessionStorage` in the browser |
//!
//! ## Stored format
//!
//! Values are JSON envelopes `{"state": <T>, "version": 0}`. An entry that fails
//! to parse, or carries another version, is ignored and the default state is
//! used; the failure is logged with `tracing::warn!`.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Storage key of the durable sidebar state.
pub const SIDEBAR_STATE_KEY: &str = "sidebar-state";
/// Storage key of the session-scoped search state.
pub const SEARCH_STATE_KEY: &str = "user-search-state";

const STATE_VERSION: u32 = 0;

/// Lifetime of a persisted entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageScope {
    /// Survives restarts (`localStorage`).
    Durable,
    /// Lives as long as the tab / process (`sessionStorage`).
    Session,
}

/// Synchronous key/value storage backend.
pub trait StateStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope<T> {
    state: T,
    version: u32,
}

/// A state value mirrored into one storage key.
pub struct PersistedStore<T> {
    key: &'static str,
    storage: Box<dyn StateStorage>,
    state: T,
}

impl<T> PersistedStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Load the state stored under `key`, or the default if nothing usable is stored.
    pub fn load(key: &'static str, storage: Box<dyn StateStorage>) -> Self {
        let state = storage
            .get_item(key)
            .and_then(|raw| match serde_json::from_str::<Envelope<T>>(&raw) {
                Ok(envelope) if envelope.version == STATE_VERSION => Some(envelope.state),
                Ok(envelope) => {
                    tracing::warn!(
                        key,
                        version = envelope.version,
                        "discarding persisted state with unknown version"
                    );
                    None
                }
                Err(e) => {
                    tracing::warn!(key, error = %e, "discarding unreadable persisted state");
                    None
                }
            })
            .unwrap_or_default();

        Self { key, storage, state }
    }

    pub fn get(&self) -> &T {
        &self.state
    }

    /// Mutate the state and write it back.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.state);
        self.save();
    }

    /// Drop the stored entry and return to the default state.
    pub fn reset(&mut self) {
        self.state = T::default();
        self.storage.remove_item(self.key);
    }

    fn save(&self) {
        let envelope = EnvelopeRef {
            state: &self.state,
            version: STATE_VERSION,
        };
        match serde_json::to_string(&envelope) {
            Ok(raw) => self.storage.set_item(self.key, &raw),
            Err(e) => tracing::warn!(key = self.key, error = %e, "failed to serialize state"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistedStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedStore")
            .field("key", &self.key)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    #[test]
    fn test_update_writes_envelope() {
        let storage = MemoryStorage::new();
        let mut store: PersistedStore<Counter> =
            PersistedStore::load("counter", Box::new(storage.clone()));

        store.update(|c| c.count = 3);

        assert_eq!(
            storage.get_item("counter").as_deref(),
            Some(r#"{"state":{"count":3},"version":0}"#)
        );
    }

    #[test]
    fn test_load_restores_saved_state() {
        let storage = MemoryStorage::new();
        {
            let mut store: PersistedStore<Counter> =
            PersistedStore::load("counter", Box::new(storage.clone()));
            store.update(|c| c.count = 9);
        }

        let store: PersistedStore<Counter> = PersistedStore::load("counter", Box::new(storage));
        assert_eq!(store.get().count, 9);
    }

    #[test]
    fn test_corrupt_or_foreign_version_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.set_item("counter", "not json");
        let store: PersistedStore<Counter> =
            PersistedStore::load("counter", Box::new(storage.clone()));
        assert_eq!(store.get(), &Counter::default());

        storage.set_item("counter", r#"{"state":{"count":5},"version":7}"#);
        let store: PersistedStore<Counter> = PersistedStore::load("counter", Box::new(storage));
        assert_eq!(store.get(), &Counter::default());
    }

    #[test]
    fn test_reset_removes_entry() {
        let storage = MemoryStorage::new();
        let mut store: PersistedStore<Counter> =
            PersistedStore::load("counter", Box::new(storage.clone()));
        store.update(|c| c.count = 1);

        store.reset();

        assert!(storage.get_item("counter").is_none());
        assert_eq!(store.get().count, 0);
    }
}
