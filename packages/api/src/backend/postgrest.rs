use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::{Map, Value};

use super::{BackendError, QueryService, RowKey};
use crate::config::BackendConfig;

/// Client for the backend's PostgREST interface at `{url}/rest/v1/{table}`.
#[derive(Clone, Debug)]
pub struct PostgrestClient {
    http: reqwest::Client,
    rest_url: String,
    auth_key: String,
}

impl PostgrestClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            auth_key: config.auth_key.clone(),
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.auth_key)
            .bearer_auth(&self.auth_key)
    }
}

/// `ilike` pattern for a substring match. `*` is the wildcard, so it is dropped
/// from the term; `%`, `_` and `\` are escaped.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push_str("ilike.*");
    for ch in term.chars() {
        match ch {
            '*' => {}
            '%' | '_' | '\\' => {
                pattern.push('\\');
                pattern.push(ch);
            }
            _ => pattern.push(ch),
        }
    }
    pattern.push('*');
    pattern
}

fn key_filter(key: &RowKey) -> [(&'static str, String); 2] {
    [
        ("select", "*".to_string()),
        (key.column, format!("eq.{}", key.value)),
    ]
}

async fn rows(response: Response) -> Result<Vec<Value>, BackendError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
        return Err(BackendError::Query {
            status: status.as_u16(),
            message,
        });
    }

    if body.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl QueryService for PostgrestClient {
    async fn select_all(&self, table: &str) -> Result<Vec<Value>, BackendError> {
        let response = self
            .request(Method::GET, table)
            .query(&[("select", "*")])
            .send()
            .await?;
        rows(response).await
    }

    async fn select_containing(
        &self,
        table: &str,
        column: &str,
        term: &str,
    ) -> Result<Vec<Value>, BackendError> {
        let pattern = contains_pattern(term);
        let response = self
            .request(Method::GET, table)
            .query(&[("select", "*"), (column, pattern.as_str())])
            .send()
            .await?;
        rows(response).await
    }

    async fn update_where(
        &self,
        table: &str,
        key: &RowKey,
        changes: &Map<String, Value>,
    ) -> Result<Vec<Value>, BackendError> {
        let response = self
            .request(Method::PATCH, table)
            .query(&key_filter(key))
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await?;
        rows(response).await
    }

    async fn delete_where(&self, table: &str, key: &RowKey) -> Result<Vec<Value>, BackendError> {
        let response = self
            .request(Method::DELETE, table)
            .query(&key_filter(key))
            .header("Prefer", "return=representation")
            .send()
            .await?;
        rows(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_wraps_term() {
        assert_eq!(contains_pattern("Ali"), "ilike.*Ali*");
    }

    #[test]
    fn test_contains_pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern("50%_a*b"), "ilike.*50\\%\\_ab*");
    }

    #[test]
    fn test_rest_url_ignores_trailing_slash() {
        let client = PostgrestClient::new(&BackendConfig {
            url: "https://project.supabase.co/".into(),
            auth_key: "key".into(),
        });
        assert_eq!(client.rest_url, "https://project.supabase.co/rest/v1");
    }
}
