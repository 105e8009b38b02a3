//! Sandbox error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for every endpoint. Each variant
//! maps to one fixed HTTP status code and the flat `{"error": string}` JSON
//! body the emulated platforms return. Error messages are part of the wire
//! contract, so variants carry the full message verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Flat JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// { "error": "Invalid availabilityState" }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad or missing credentials (bearer token, basic auth, key/secret).
    #[error("{0}")]
    Unauthorized(String),

    /// Integrator-identity header missing or mismatched.
    #[error("{0}")]
    Forbidden(String),

    /// No record matched the request's identity fields.
    #[error("{0}")]
    NotFound(String),

    /// Malformed JSON, invalid enum value, or missing required field.
    #[error("{0}")]
    InvalidInput(String),

    /// Request body carried the wrong content type.
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// Simulated optimistic-lock failure on a status update.
    ///
    /// The emulated platform surfaces this as HTTP 400 with a
    /// `Conflict:` message, not as 409.
    #[error("{0}")]
    Conflict(String),

    /// Persistence call failed.
    #[error("{0}")]
    Backend(String),
}

impl ApiError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_fixed_per_variant() {
        assert_eq!(
            ApiError::Unauthorized("Unauthorized".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("Forbidden".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("Not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidInput("Invalid JSON body".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnsupportedMediaType("nope".into()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        // The emulated contract has no 409; conflicts surface as 400.
        assert_eq!(
            ApiError::Conflict("Conflict: try again".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Backend("Database error".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn message_passes_through_verbatim() {
        let err = ApiError::InvalidInput("Invalid availabilityState".into());
        assert_eq!(err.to_string(), "Invalid availabilityState");
    }
}
