//! Error types for the todo API client.
//!
//! # Design
//! Every non-2xx response lands in `Status` with the raw status code and
//! body. A 2xx response with an unexpected body is a `Parse` error so the two
//! stay distinguishable in logs. `MissingBaseUrl` is raised while building a
//! request, before anything reaches the network.

/// Errors returned by the API client and transports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No base URL is configured for the backend.
    #[error("API base URL is not configured (set {var})", var = crate::config::BASE_URL_ENV)]
    MissingBaseUrl,

    /// The server answered with a status outside 2xx.
    #[error("request failed: {status}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("failed to parse response body: {0}")]
    Parse(String),

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Whether this is a configuration error rather than a request failure.
    pub fn is_config(&self) -> bool {
        matches!(self, ApiError::MissingBaseUrl)
    }

    /// Status code of a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code() {
        let err = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "request failed: 500");
        assert!(!err.is_config());
    }

    #[test]
    fn missing_base_url_names_the_variable() {
        let err = ApiError::MissingBaseUrl;
        assert!(err.is_config());
        assert!(err.to_string().contains("TODO_API_BASE_URL"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn parse_error_is_not_a_status_error() {
        let err = ApiError::Parse("expected value".to_string());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("expected value"));
    }
}
