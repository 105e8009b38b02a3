//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{DeliveryHeroService, GetirService, TrendyolService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Delivery Hero endpoint logic.
    pub deliveryhero: Arc<DeliveryHeroService>,
    /// Getir endpoint logic.
    pub getir: Arc<GetirService>,
    /// Trendyol endpoint logic.
    pub trendyol: Arc<TrendyolService>,
}
