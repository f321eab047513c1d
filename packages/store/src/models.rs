//! # User profile records and response validation
//!
//! [`UserProfile`] mirrors one row of the backend's `users` table. It is
//! `Serialize + Deserialize` so the same type is used for proxy request bodies,
//! proxy responses, and the persisted search results.
//!
//! ## Validation
//!
//! Every JSON payload that reaches UI state goes through [`validate_profiles`]
//! (or [`validate_profile`] for single rows). Validation is plain serde
//! deserialization: a missing required column or a wrongly typed value is a
//! [`ValidationError`] carrying the serde message, so callers can log the
//! offending shape before discarding it.
//!
//! | Column | Required | Notes |
//! |--------|----------|-------|
//! | `id` | yes | generated by the backend, primary key |
//! | `created_at` | yes | RFC 3339 timestamp string |
//! | `email`, `username`, `full_name`, `job_title` | yes | |
//! | `company`, `department`, `bio`, `last_sign_in_at` | no | absent and `null` are equivalent |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One user profile row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub created_at: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub job_title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub last_sign_in_at: Option<String>,
}

/// A payload did not have the shape of a user profile (or list of them).
#[derive(Debug, Error)]
#[error("invalid user profile payload: {0}")]
pub struct ValidationError(#[from] serde_json::Error);

/// Validate a JSON value as an array of user profiles.
pub fn validate_profiles(value: Value) -> Result<Vec<UserProfile>, ValidationError> {
    Ok(serde_json::from_value(value)?)
}

/// Validate a JSON value as a single user profile.
pub fn validate_profile(value: Value) -> Result<UserProfile, ValidationError> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
pub(crate) fn sample_profile(id: &str, full_name: &str, job_title: &str) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        created_at: "2024-03-01T10:00:00+00:00".to_string(),
        email: format!("{id}@example.com"),
        username: format!("user_{id}"),
        full_name: full_name.to_string(),
        job_title: job_title.to_string(),
        company: None,
        department: None,
        bio: None,
        last_sign_in_at: None,
    }
}
