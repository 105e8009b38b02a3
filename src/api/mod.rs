//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Platform endpoints are mounted under `/api`; the health check sits at
//! the root.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all platform endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
}
