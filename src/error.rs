//! Request-scoped error taxonomy and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Failures a single request can produce.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path token did not match the configured secret.
    #[error("invalid token")]
    InvalidToken,

    /// Write request arrived with an empty body.
    #[error("empty request body")]
    EmptyBody,

    /// Write request body was not a JSON object.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The record store failed; nothing was persisted for this request.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidToken => (StatusCode::FORBIDDEN, "Invalid token"),
            ApiError::EmptyBody | ApiError::MalformedBody(_) => {
                (StatusCode::BAD_REQUEST, "Bad request")
            }
            ApiError::Store(e) => {
                error!(error = %e, "record store failure");
                (StatusCode::BAD_GATEWAY, "Record store unavailable")
            }
        };
        (status, message).into_response()
    }
}
