//! # API crate: the dashboard's data path
//!
//! The server half forwards generic HTTP verbs to the hosted backend's table
//! interface. The client half is what the UI calls on every target.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`client`] | always | [`ProxyClient`] for `/api/proxy/{table}` and its [`FetchError`] |
//! | `config` | `server` | `BackendConfig` read from `SUPABASE_URL` / `SUPABASE_AUTH_KEY` |
//! | `backend` | `server` | The `QueryService` seam, PostgREST client and in-memory backend |
//! | `error` | `server` | `ProxyError`, the single error boundary of the proxy handlers |
//! | `proxy` | `server` | The axum router serving `/api/proxy/{table}` |

pub mod client;

#[cfg(feature = "server")]
pub mod backend;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod proxy;

pub use client::{http_error_message, FetchError, ProxyClient};
pub use store::UserProfile;

#[cfg(feature = "server")]
pub use backend::{BackendError, MemoryBackend, PostgrestClient, QueryService};
#[cfg(feature = "server")]
pub use config::{BackendConfig, ConfigError};
#[cfg(feature = "server")]
pub use error::ProxyError;
