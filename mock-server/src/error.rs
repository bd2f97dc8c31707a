//! Handler errors and their HTTP mapping.
//!
//! Responses carry a short plain-text reason, matching what the real backend
//! sends.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// 400 Bad Request
    #[error("{0}")]
    BadRequest(&'static str),

    /// 404 Not Found
    #[error("todo not found")]
    NotFound,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
        };
        tracing::debug!(%status, reason = %self, "rejecting request");
        (status, self.to_string()).into_response()
    }
}
