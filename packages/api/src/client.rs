//! Calls from the dashboard to its own proxy routes.

use reqwest::RequestBuilder;
use serde_json::Value;
use store::search::INVALID_FORMAT_MESSAGE;
use store::{validate_profile, validate_profiles, SearchFailure, UserProfile, ValidationError};
use thiserror::Error;

pub const USERS_TABLE: &str = "users";
pub const UNKNOWN_SERVER_ERROR: &str = "خطای ناشناخته در سرور";

#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx response.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("{}", INVALID_FORMAT_MESSAGE)]
    InvalidFormat(#[source] ValidationError),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl From<FetchError> for SearchFailure {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidFormat(_) => SearchFailure::InvalidFormat,
            other => SearchFailure::Request(other.to_string()),
        }
    }
}

/// User-facing message for a failed response.
///
/// A JSON body's `message` wins (a nested `{message}` object is unwrapped).
/// A body that is not JSON yields a generic server error; JSON without a
/// message falls back to the status code.
pub fn http_error_message(status: u16, body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return UNKNOWN_SERVER_ERROR.to_string();
    };
    let message = match value.get("message") {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(nested @ Value::Object(_)) => nested.get("message").and_then(Value::as_str),
        _ => None,
    };
    match message {
        Some(m) if !m.trim().is_empty() => m.to_string(),
        _ => format!("خطای HTTP: {status}"),
    }
}

fn no_rows() -> ValidationError {
    ValidationError::from(<serde_json::Error as serde::de::Error>::custom(
        "expected at least one updated row",
    ))
}

/// HTTP client for `/api/proxy/{table}`.
#[derive(Clone, Debug)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
    table: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            table: USERS_TABLE.to_string(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    fn url(&self) -> String {
        format!("{}/api/proxy/{}", self.base_url, self.table)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, FetchError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = http_error_message(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), %message, "proxy request failed");
            return Err(FetchError::Http {
                status: status.as_u16(),
                message,
            });
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| FetchError::InvalidFormat(e.into()))
    }

    pub async fn list_users(&self) -> Result<Vec<UserProfile>, FetchError> {
        let rows = self.send(self.http.get(self.url())).await?;
        validate_profiles(rows).map_err(FetchError::InvalidFormat)
    }

    /// Users whose full name contains `term`, ignoring case.
    pub async fn search_users(&self, term: &str) -> Result<Vec<UserProfile>, FetchError> {
        let request = self
            .http
            .post(self.url())
            .query(&[("full_name", term.trim())])
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        let rows = self.send(request).await?;
        validate_profiles(rows).map_err(FetchError::InvalidFormat)
    }

    /// Send the whole record and return the row as stored.
    pub async fn update_user(&self, profile: &UserProfile) -> Result<UserProfile, FetchError> {
        let rows = self.send(self.http.put(self.url()).json(profile)).await?;
        match rows {
            Value::Array(mut rows) if !rows.is_empty() => {
                validate_profile(rows.swap_remove(0)).map_err(FetchError::InvalidFormat)
            }
            _ => Err(FetchError::InvalidFormat(no_rows())),
        }
    }

    pub async fn delete_user(&self, profile: &UserProfile) -> Result<(), FetchError> {
        let request = self.http.delete(self.url()).query(&[
            ("id", profile.id.as_str()),
            ("username", profile.username.as_str()),
        ]);
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_json_body() {
        let body = br#"{"message": "No record found or updated"}"#;
        assert_eq!(http_error_message(404, body), "No record found or updated");
    }

    #[test]
    fn test_nested_message_is_unwrapped() {
        let body = br#"{"message": {"message": "duplicate key", "code": "23505"}}"#;
        assert_eq!(http_error_message(500, body), "duplicate key");
    }

    #[test]
    fn test_non_json_body() {
        assert_eq!(http_error_message(502, b"<html>Bad Gateway</html>"), UNKNOWN_SERVER_ERROR);
    }

    #[test]
    fn test_json_without_message() {
        assert_eq!(http_error_message(503, br#"{"error": true}"#), "خطای HTTP: 503");
    }

    #[test]
    fn test_invalid_format_maps_to_search_failure() {
        let err = FetchError::InvalidFormat(no_rows());
        assert_eq!(err.to_string(), INVALID_FORMAT_MESSAGE);
        assert_eq!(SearchFailure::from(err), SearchFailure::InvalidFormat);
    }

    #[test]
    fn test_http_error_maps_to_request_failure() {
        let err = FetchError::Http {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(SearchFailure::from(err), SearchFailure::Request("boom".into()));
    }

    #[test]
    fn test_url_joins_base_and_table() {
        let client = ProxyClient::new("http://localhost:8080/");
        assert_eq!(client.url(), "http://localhost:8080/api/proxy/users");
        assert_eq!(client.with_table("staff").url(), "http://localhost:8080/api/proxy/staff");
    }
}
