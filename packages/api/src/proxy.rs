//! Proxy routes under `/api/proxy/{table}`.
//!
//! The first path segment names the backend table; any further segments are
//! ignored. Verbs map onto [`QueryService`] calls:
//!
//! | Verb | Input | Backend call |
//! |------|-------|--------------|
//! | GET | optional `full_name` query | `select_all`, or `select_containing` when a term is given |
//! | POST | `full_name` query | `select_containing` |
//! | PUT | record body | `update_where`, keyed by `id` or `username` |
//! | DELETE | `id` or `username` query | `delete_where` |

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use tower_http::trace::TraceLayer;

use crate::backend::{QueryService, RowKey};
use crate::error::ProxyError;

pub const SEARCH_COLUMN: &str = "full_name";

#[derive(Clone)]
pub struct ProxyState {
    backend: Arc<dyn QueryService>,
}

/// Router serving the proxy routes. Merge it into the application router.
pub fn router(backend: Arc<dyn QueryService>) -> Router {
    Router::new()
        .route(
            "/api/proxy/{table}",
            get(list_rows).post(search_rows).put(update_row).delete(delete_row),
        )
        .route(
            "/api/proxy/{table}/{*rest}",
            get(list_rows).post(search_rows).put(update_row).delete(delete_row),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(ProxyState { backend })
}

type Params = HashMap<String, String>;
type QueryParams = Result<Query<Params>, QueryRejection>;

fn table_name(path: &Params) -> Result<&str, ProxyError> {
    let table = path.get("table").map(String::as_str).unwrap_or_default();
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(table)
    } else {
        Err(ProxyError::InvalidTable)
    }
}

fn query_params(query: QueryParams) -> Result<Params, ProxyError> {
    query.map(|Query(q)| q).map_err(|_| ProxyError::InvalidQuery)
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

async fn search(
    backend: &dyn QueryService,
    table: &str,
    term: Option<&String>,
) -> Result<Vec<Value>, ProxyError> {
    let Some(term) = non_empty(term) else {
        return Ok(Vec::new());
    };
    tracing::debug!(table, term = %term, "searching rows");
    Ok(backend.select_containing(table, SEARCH_COLUMN, &term).await?)
}

async fn list_rows(
    State(state): State<ProxyState>,
    Path(path): Path<Params>,
    query: QueryParams,
) -> Result<Json<Value>, ProxyError> {
    let table = table_name(&path)?;
    let query = query_params(query)?;

    let rows = match query.get(SEARCH_COLUMN) {
        Some(term) => search(state.backend.as_ref(), table, Some(term)).await?,
        None => state.backend.select_all(table).await?,
    };
    Ok(Json(Value::Array(rows)))
}

async fn search_rows(
    State(state): State<ProxyState>,
    Path(path): Path<Params>,
    query: QueryParams,
) -> Result<Json<Value>, ProxyError> {
    let table = table_name(&path)?;
    let query = query_params(query)?;

    let rows = search(state.backend.as_ref(), table, query.get(SEARCH_COLUMN)).await?;
    Ok(Json(Value::Array(rows)))
}

/// `id` when the record carries one, otherwise `username`.
fn body_key(body: &Map<String, Value>) -> Option<RowKey> {
    ["id", "username"].into_iter().find_map(|column| {
        let value = match body.get(column)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!value.is_empty()).then_some(RowKey { column, value })
    })
}

fn query_key(query: &Params) -> Option<RowKey> {
    ["id", "username"]
        .into_iter()
        .find_map(|column| non_empty(query.get(column)).map(|value| RowKey { column, value }))
}

async fn update_row(
    State(state): State<ProxyState>,
    Path(path): Path<Params>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ProxyError> {
    let table = table_name(&path)?;
    let Ok(Json(Value::Object(mut changes))) = body else {
        return Err(ProxyError::InvalidBody);
    };
    let key = body_key(&changes).ok_or(ProxyError::MissingKey("Username is required for update"))?;
    changes.remove(key.column);

    tracing::info!(table, key = key.column, value = %key.value, "updating row");
    let rows = state.backend.update_where(table, &key, &changes).await?;
    if rows.is_empty() {
        return Err(ProxyError::NotFound);
    }
    Ok(Json(Value::Array(rows)))
}

async fn delete_row(
    State(state): State<ProxyState>,
    Path(path): Path<Params>,
    query: QueryParams,
) -> Result<Json<Value>, ProxyError> {
    let table = table_name(&path)?;
    let query = query_params(query)?;
    let key = query_key(&query).ok_or(ProxyError::MissingKey("Username is required for deletion"))?;

    tracing::info!(table, key = key.column, value = %key.value, "deleting row");
    let rows = state.backend.delete_where(table, &key).await?;
    Ok(Json(Value::Array(rows)))
}
