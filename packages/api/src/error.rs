use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;

/// Every failure the proxy can answer with. The body is always `{"message": ...}`.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid table name")]
    InvalidTable,
    #[error("Invalid query string")]
    InvalidQuery,
    #[error("Invalid request body")]
    InvalidBody,
    #[error("{0}")]
    MissingKey(&'static str),
    #[error("No record found or updated")]
    NotFound,
    /// Error reported by the backend, passed through as-is.
    #[error("{0}")]
    Backend(String),
    #[error("Internal Server Error")]
    Internal,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidTable
            | ProxyError::InvalidQuery
            | ProxyError::InvalidBody
            | ProxyError::MissingKey(_) => StatusCode::BAD_REQUEST,
            ProxyError::NotFound => StatusCode::NOT_FOUND,
            ProxyError::Backend(_) | ProxyError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BackendError> for ProxyError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Query { status, message } => {
                tracing::warn!(status, %message, "backend rejected query");
                ProxyError::Backend(message)
            }
            other => {
                tracing::error!(error = %other, "backend request failed");
                ProxyError::Internal
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_is_passed_through() {
        let err = ProxyError::from(BackendError::Query {
            status: 400,
            message: "column users.nope does not exist".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "column users.nope does not exist");
    }

    #[test]
    fn test_decode_failure_is_generic() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ProxyError::from(BackendError::Decode(decode));
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn test_missing_key_is_bad_request() {
        let err = ProxyError::MissingKey("Username is required for deletion");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Username is required for deletion");
    }
}
