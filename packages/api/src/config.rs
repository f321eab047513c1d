//! Backend configuration from environment variables.

use std::fmt;

use thiserror::Error;

pub const BACKEND_URL_VAR: &str = "SUPABASE_URL";
pub const BACKEND_KEY_VAR: &str = "SUPABASE_AUTH_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not defined in environment variables.")]
    Missing(&'static str),
}

/// Connection settings for the hosted backend.
#[derive(Clone)]
pub struct BackendConfig {
    /// Project URL; the REST interface lives under `{url}/rest/v1`.
    pub url: String,
    /// Key sent as `apikey` and bearer token.
    pub auth_key: String,
}

impl BackendConfig {
    /// Read the configuration from the process environment (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`. Blank values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            url: required(BACKEND_URL_VAR)?,
            auth_key: required(BACKEND_KEY_VAR)?,
        })
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("auth_key", &"<redacted>")
            .finish()
    }
}
