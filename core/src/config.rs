//! Base URL configuration for the API client.
//!
//! The base URL is resolved every time a request is built, so an environment
//! change between calls is picked up and a missing value fails the call
//! before any request exists.

use std::env;

use crate::error::ApiError;

/// Environment variable holding the backend's root address.
pub const BASE_URL_ENV: &str = "TODO_API_BASE_URL";

/// Where the client gets its base URL from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseUrl {
    /// A value supplied by the caller.
    Fixed(String),
    /// An environment variable read on every call.
    Env(String),
}

impl BaseUrl {
    /// Read from [`BASE_URL_ENV`].
    pub fn from_env() -> Self {
        BaseUrl::Env(BASE_URL_ENV.to_string())
    }

    /// Resolve to a usable root without a trailing slash.
    ///
    /// Missing, empty and whitespace-only values all count as unconfigured.
    pub fn resolve(&self) -> Result<String, ApiError> {
        let raw = match self {
            BaseUrl::Fixed(value) => value.clone(),
            BaseUrl::Env(var) => env::var(var).unwrap_or_default(),
        };
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ApiError::MissingBaseUrl);
        }
        Ok(trimmed.to_string())
    }
}

impl From<&str> for BaseUrl {
    fn from(value: &str) -> Self {
        BaseUrl::Fixed(value.to_string())
    }
}

impl From<String> for BaseUrl {
    fn from(value: String) -> Self {
        BaseUrl::Fixed(value)
    }
}
