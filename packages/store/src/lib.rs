pub mod edit;
pub mod models;
pub mod persist;
pub mod search;
pub mod sidebar;
pub mod table;

mod memory;
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use web_storage::WebStorage;

pub use edit::{ProfileDraft, ProfileField};
pub use models::{validate_profile, validate_profiles, UserProfile, ValidationError};
pub use persist::{PersistedStore, StateStorage, StorageScope};
pub use search::{SearchFailure, SearchPhase, SearchPipeline};
pub use sidebar::SidebarStore;
