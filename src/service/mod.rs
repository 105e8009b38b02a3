//! Service layer: per-platform business logic orchestration.
//!
//! Each service implements the shared request-handling shape over the
//! injected [`crate::storage::PlatformStore`]: validate credentials,
//! locate the record, validate the requested state, apply the mutation,
//! format the result.

pub mod deliveryhero_service;
pub mod getir_service;
pub mod trendyol_service;

pub use deliveryhero_service::DeliveryHeroService;
pub use getir_service::{GetirService, RestaurantGrant};
pub use trendyol_service::{StorePage, TrendyolService};
