//! Platform storage backends for the persisted stores.
//!
//! - **Web** (WASM + `web` feature): `localStorage` / `sessionStorage` via [`store::WebStorage`]
//! - **Native**: durable entries as files under `<data_dir>/admin-dashboard/`,
//!   session entries in memory for the life of the process

use store::{StateStorage, StorageScope};

/// Directory name under the platform data dir.
pub const APP_DIR: &str = "admin-dashboard";

/// Create the storage backend for `scope` on the current platform.
pub fn make_storage(scope: StorageScope) -> Box<dyn StateStorage> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Box::new(store::WebStorage::new(scope))
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        native_storage(scope)
    }
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn native_storage(scope: StorageScope) -> Box<dyn StateStorage> {
    match scope {
        #[cfg(not(target_arch = "wasm32"))]
        StorageScope::Durable => {
            let base = dirs::data_dir()
                .unwrap_or_else(|| std::path::PathBuf::from("."))
                .join(APP_DIR);
            Box::new(store::FileStorage::new(base))
        }
        _ => Box::new(store::MemoryStorage::new()),
    }
}
