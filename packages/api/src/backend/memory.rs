use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{BackendError, QueryService, RowKey};

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<String, Vec<Map<String, Value>>>,
    failure: Option<String>,
}

/// In-process [`QueryService`] for local runs and tests. Clones share rows.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
    calls: Arc<AtomicUsize>,
}

fn text(row: &Map<String, Value>, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `table` with `rows`. Non-object rows are skipped.
    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .filter_map(|row| match row {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.lock().tables.insert(table.to_string(), rows);
        self
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock()
            .tables
            .get(table)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    /// Make every following query fail with `message`.
    pub fn fail_with(&self, message: &str) {
        self.lock().failure = Some(message.to_string());
    }

    /// Number of queries received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_table<R>(
        &self,
        table: &str,
        f: impl FnOnce(&mut Vec<Map<String, Value>>) -> R,
    ) -> Result<R, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.lock();
        if let Some(message) = inner.failure.clone() {
            return Err(BackendError::Query {
                status: 400,
                message,
            });
        }
        match inner.tables.get_mut(table) {
            Some(rows) => Ok(f(rows)),
            None => Err(BackendError::Query {
                status: 404,
                message: format!("relation \"public.{table}\" does not exist"),
            }),
        }
    }
}

fn key_matches(row: &Map<String, Value>, key: &RowKey) -> bool {
    text(row, key.column).as_deref() == Some(key.value.as_str())
}

#[async_trait]
impl QueryService for MemoryBackend {
    async fn select_all(&self, table: &str) -> Result<Vec<Value>, BackendError> {
        self.with_table(table, |rows| rows.iter().cloned().map(Value::Object).collect())
    }

    async fn select_containing(
        &self,
        table: &str,
        column: &str,
        term: &str,
    ) -> Result<Vec<Value>, BackendError> {
        let needle = term.to_lowercase();
        self.with_table(table, |rows| {
            rows.iter()
                .filter(|row| {
                    text(row, column)
                        .map(|v| v.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
                .cloned()
                .map(Value::Object)
                .collect()
        })
    }

    async fn update_where(
        &self,
        table: &str,
        key: &RowKey,
        changes: &Map<String, Value>,
    ) -> Result<Vec<Value>, BackendError> {
        self.with_table(table, |rows| {
            rows.iter_mut()
                .filter(|row| key_matches(row, key))
                .map(|row| {
                    for (column, value) in changes {
                        row.insert(column.clone(), value.clone());
                    }
                    Value::Object(row.clone())
                })
                .collect()
        })
    }

    async fn delete_where(&self, table: &str, key: &RowKey) -> Result<Vec<Value>, BackendError> {
        self.with_table(table, |rows| {
            let (removed, kept): (Vec<_>, Vec<_>) =
                rows.drain(..).partition(|row| key_matches(row, key));
            *rows = kept;
            removed.into_iter().map(Value::Object).collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend() -> MemoryBackend {
        MemoryBackend::new().with_rows(
            "users",
            vec![
                json!({"id": "1", "username": "ali", "full_name": "Ali Rezaei"}),
                json!({"id": "2", "username": "sara", "full_name": "Sara Ahmadi"}),
            ],
        )
    }

    #[tokio::test]
    async fn test_select_containing_ignores_case() {
        let rows = backend().select_containing("users", "full_name", "ali").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "1");
    }

    #[tokio::test]
    async fn test_delete_returns_removed_rows() {
        let backend = backend();
        let key = RowKey {
            column: "username",
            value: "sara".into(),
        };
        let removed = backend.delete_where("users", &key).await.unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(backend.rows("users").len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_table_is_a_query_error() {
        let err = backend().select_all("orders").await.unwrap_err();
        assert!(matches!(err, BackendError::Query { status: 404, .. }));
    }
}
