//! Row queries against the hosted backend.
//!
//! The proxy handlers only see [`QueryService`]. [`PostgrestClient`] talks to
//! the real REST interface; [`MemoryBackend`] keeps rows in process.

mod memory;
mod postgrest;

pub use memory::MemoryBackend;
pub use postgrest::PostgrestClient;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with an error body.
    #[error("{message}")]
    Query { status: u16, message: String },
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Equality filter selecting the rows a mutation applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowKey {
    pub column: &'static str,
    pub value: String,
}

#[async_trait]
pub trait QueryService: Send + Sync {
    /// Every row of `table`.
    async fn select_all(&self, table: &str) -> Result<Vec<Value>, BackendError>;

    /// Rows whose `column` contains `term`, ignoring case.
    async fn select_containing(
        &self,
        table: &str,
        column: &str,
        term: &str,
    ) -> Result<Vec<Value>, BackendError>;

    /// Write `changes` to the rows matching `key` and return them as updated.
    async fn update_where(
        &self,
        table: &str,
        key: &RowKey,
        changes: &Map<String, Value>,
    ) -> Result<Vec<Value>, BackendError>;

    /// Delete the rows matching `key` and return them.
    async fn delete_where(&self, table: &str, key: &RowKey) -> Result<Vec<Value>, BackendError>;
}
