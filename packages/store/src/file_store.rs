//! # Filesystem-backed state storage
//!
//! [`FileStorage`] is the [`StateStorage`] used for the durable scope on native
//! builds (server-side rendering, local development). Each key is one JSON file:
//!
//! ```text
//! <base_dir>/
//! ├── sidebar-state.json
//! └── user-search-state.json
//! ```
//!
//! Use [`dirs::data_dir()`](https://docs.rs/dirs) to obtain a platform-appropriate base,
//! e.g. `~/.local/share/admin-dashboard/` on Linux.
//!
//! I/O failures are logged and otherwise ignored; a missing or unreadable file
//! reads as "nothing stored".

use std::path::PathBuf;

use crate::persist::StateStorage;

/// Filesystem-backed StateStorage.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn item_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base.join(format!("{name}.json"))
    }
}

impl StateStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.item_path(key)).ok()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!(
                dir = %self.base.display(),
                error = %e,
                "failed to create state directory"
            );
            return;
        }
        if let Err(e) = std::fs::write(self.item_path(key), value) {
            tracing::warn!(key, error = %e, "failed to write state file");
        }
    }

    fn remove_item(&self, key: &str) {
        let _ = std::fs::remove_file(self.item_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SidebarStore;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = std::env::temp_dir().join(format!("admin_dashboard_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let mut sidebar = SidebarStore::new(Box::new(FileStorage::new(dir.clone())));
        assert!(sidebar.is_open());
        sidebar.toggle();

        // Re-open from same directory
        let reopened = SidebarStore::new(Box::new(FileStorage::new(dir.clone())));
        assert!(!reopened.is_open());
        assert!(dir.join("sidebar-state.json").exists());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_keys_are_sanitized() {
        let storage = FileStorage::new(PathBuf::from("/tmp/base"));
        assert_eq!(
            storage.item_path("../etc/passwd"),
            PathBuf::from("/tmp/base/___etc_passwd.json")
        );
    }
}
