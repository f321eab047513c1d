use serde::{Deserialize, Serialize};

use crate::persist::{PersistedStore, StateStorage, SIDEBAR_STATE_KEY};

/// Viewport width (px) below which the sidebar starts closed.
pub const SIDEBAR_BREAKPOINT_PX: f64 = 970.0;

/// Persisted sidebar state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarState {
    pub is_open: bool,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self { is_open: true }
    }
}

/// Sidebar open/closed flag.
///
/// Choices made by the user are mirrored into durable storage. Closing for a
/// narrow viewport only affects the current view.
#[derive(Debug)]
pub struct SidebarStore {
    inner: PersistedStore<SidebarState>,
    open: bool,
}

impl SidebarStore {
    pub fn new(storage: Box<dyn StateStorage>) -> Self {
        let inner: PersistedStore<SidebarState> = PersistedStore::load(SIDEBAR_STATE_KEY, storage);
        let open = inner.get().is_open;
        Self { inner, open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.set_open(!self.open);
    }

    pub fn open(&mut self) {
        self.set_open(true);
    }

    pub fn close(&mut self) {
        self.set_open(false);
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
        if self.inner.get().is_open != open {
            self.inner.update(|s| s.is_open = open);
        }
    }

    /// Close the sidebar when the viewport is too narrow to show it beside the
    /// content; on a wide viewport fall back to the stored choice.
    pub fn fit_viewport(&mut self, width_px: f64) {
        self.open = width_px >= SIDEBAR_BREAKPOINT_PX && self.inner.get().is_open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn test_defaults_open_and_persists_toggle() {
        let storage = MemoryStorage::new();
        let mut sidebar = SidebarStore::new(Box::new(storage.clone()));
        assert!(sidebar.is_open());

        sidebar.toggle();
        assert!(!sidebar.is_open());
        assert_eq!(
            storage.get_item(SIDEBAR_STATE_KEY).as_deref(),
            Some(r#"{"state":{"isOpen":false},"version":0}"#)
        );

        let restored = SidebarStore::new(Box::new(storage));
        assert!(!restored.is_open());
    }

    #[test]
    fn test_open_close() {
        let mut sidebar = SidebarStore::new(Box::new(MemoryStorage::new()));
        sidebar.close();
        assert!(!sidebar.is_open());
        sidebar.open();
        assert!(sidebar.is_open());
    }

    #[test]
    fn test_fit_viewport_closes_only_below_breakpoint() {
        let mut sidebar = SidebarStore::new(Box::new(MemoryStorage::new()));
        sidebar.fit_viewport(1280.0);
        assert!(sidebar.is_open());

        sidebar.fit_viewport(800.0);
        assert!(!sidebar.is_open());
    }

    #[test]
    fn test_narrow_viewport_close_is_not_persisted() {
        let storage = MemoryStorage::new();
        let mut sidebar = SidebarStore::new(Box::new(storage.clone()));
        sidebar.fit_viewport(600.0);
        assert!(!sidebar.is_open());
        assert!(storage.get_item(SIDEBAR_STATE_KEY).is_none());

        // Widening brings the stored choice back, and so does the next visit.
        sidebar.fit_viewport(1280.0);
        assert!(sidebar.is_open());
        assert!(SidebarStore::new(Box::new(storage.clone())).is_open());

        // Opening it by hand on a narrow screen sticks until the next resize.
        sidebar.fit_viewport(600.0);
        sidebar.toggle();
        assert!(sidebar.is_open());
        sidebar.close();
        sidebar.fit_viewport(1280.0);
        assert!(!sidebar.is_open());
    }
}
