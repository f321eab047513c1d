//! # Browser Web Storage backend
//!
//! [`WebStorage`] is the [`StateStorage`] used on the **web platform**. It wraps
//! either `window.localStorage` (durable scope) or `window.sessionStorage`
//! (session scope) through `web-sys`.
//!
//! The `Storage` handle is looked up on every call rather than cached, so a
//! store created before the window is available (or in a context where storage
//! is disabled) keeps working as a no-op instead of failing.
//!
//! ## Error handling
//!
//! Reads return `None` and writes do nothing when storage is unavailable or the
//! quota is exceeded. The UI then behaves as if nothing was persisted.

use web_sys::Storage;

use crate::persist::{StateStorage, StorageScope};

/// Web Storage (`localStorage` / `sessionStorage`) backend.
#[derive(Clone, Copy, Debug)]
pub struct WebStorage {
    scope: StorageScope,
}

impl WebStorage {
    pub fn new(scope: StorageScope) -> Self {
        Self { scope }
    }

    /// `window.localStorage`
    pub fn local() -> Self {
        Self::new(StorageScope::Durable)
    }

    /// `window.sessionStorage`
    pub fn session() -> Self {
        Self::new(StorageScope::Session)
    }

    fn storage(&self) -> Option<Storage> {
        let window = web_sys::window()?;
        let storage = match self.scope {
            StorageScope::Durable => window.local_storage(),
            StorageScope::Session => window.session_storage(),
        };
        storage.ok().flatten()
    }
}

impl StateStorage for WebStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!(key, "web storage rejected write");
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}
