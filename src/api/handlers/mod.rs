//! REST endpoint handlers organized by platform.

pub mod deliveryhero;
pub mod getir;
pub mod system;
pub mod trendyol;

use axum::Router;
use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::app_state::AppState;
use crate::error::ApiError;

/// Composes all platform routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(deliveryhero::routes())
        .merge(getir::routes())
        .merge(trendyol::routes())
}

/// Decodes a raw request body as JSON.
///
/// Bodies are read as raw bytes rather than through the `Json` extractor
/// so a malformed payload produces the platforms' own error body instead
/// of Axum's rejection text.
///
/// # Errors
///
/// `InvalidInput` with `Invalid JSON body` on any decode failure.
pub fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|_| ApiError::InvalidInput("Invalid JSON body".to_string()))
}
