//! Data Transfer Objects matching the emulated platforms' wire contracts.
//!
//! Field names follow each platform's JSON (camelCase), so every DTO
//! carries explicit serde renames rather than Rust naming.

pub mod deliveryhero_dto;
pub mod getir_dto;
pub mod trendyol_dto;

pub use deliveryhero_dto::*;
pub use getir_dto::*;
pub use trendyol_dto::*;

use serde::Serialize;
use utoipa::ToSchema;

/// Generic `{message}` success body shared by the mutation endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}
