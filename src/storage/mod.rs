//! Storage layer: the injected `PlatformStore` interface and its
//! in-memory and PostgreSQL implementations.
//!
//! Every endpoint reads and writes through [`PlatformStore`], so the same
//! handlers serve tests (seeded [`MemoryStore`]) and production
//! ([`PostgresStore`]), selected by configuration.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;

use crate::domain::{
    AvailabilityUpdate, DaySchedule, RestaurantRecord, RestaurantStatus, StoreRecord,
    StoreWorkingHours, VendorRecord, WorkingStatus,
};

/// Storage-level failure, mapped to a 500 at the API boundary.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store could not complete the call.
    #[error("{0}")]
    Backend(String),
}

/// Row-oriented access to the three platform tables.
///
/// Lookups compose equality predicates over identity fields; a miss is
/// `Ok(None)` (or an empty list), never an error. Updates touch only the
/// fields the caller supplies.
#[async_trait]
pub trait PlatformStore: Send + Sync + std::fmt::Debug {
    // ── Delivery Hero vendors ───────────────────────────────────────────

    /// Finds the vendor owning the given login username.
    async fn vendor_by_username(
        &self,
        username: &str,
    ) -> Result<Option<VendorRecord>, StorageError>;

    /// Whether any vendor row holds this access token.
    async fn vendor_token_exists(&self, token: &str) -> Result<bool, StorageError>;

    /// All vendors under a chain code + POS vendor id.
    async fn vendors_by_key(
        &self,
        chain_code: &str,
        pos_vendor_id: &str,
    ) -> Result<Vec<VendorRecord>, StorageError>;

    /// The single vendor matching chain code, POS vendor id and platform
    /// restaurant id.
    async fn vendor_by_identity(
        &self,
        chain_code: &str,
        pos_vendor_id: &str,
        platform_restaurant_id: &str,
    ) -> Result<Option<VendorRecord>, StorageError>;

    /// Applies a validated availability update to the identified vendor.
    async fn update_vendor_availability(
        &self,
        chain_code: &str,
        pos_vendor_id: &str,
        platform_restaurant_id: &str,
        update: &AvailabilityUpdate,
    ) -> Result<(), StorageError>;

    // ── Getir restaurants ───────────────────────────────────────────────

    /// Finds the restaurant owning the given restaurant secret key.
    async fn restaurant_by_secret(
        &self,
        restaurant_secret_key: &str,
    ) -> Result<Option<RestaurantRecord>, StorageError>;

    /// Finds the restaurant owning the given session token.
    async fn restaurant_by_token(
        &self,
        token: &str,
    ) -> Result<Option<RestaurantRecord>, StorageError>;

    /// Sets a restaurant's status and closure bookkeeping.
    async fn update_restaurant_status(
        &self,
        restaurant_id: &str,
        status: RestaurantStatus,
        time_off_amount: Option<i64>,
    ) -> Result<(), StorageError>;

    /// Replaces a restaurant's weekly working hours.
    async fn update_restaurant_hours(
        &self,
        restaurant_id: &str,
        hours: &[DaySchedule],
    ) -> Result<(), StorageError>;

    // ── Trendyol stores ─────────────────────────────────────────────────

    /// All stores of a supplier.
    async fn stores_by_supplier(&self, supplier_id: i64)
    -> Result<Vec<StoreRecord>, StorageError>;

    /// The single store matching supplier, store id, integrator name and
    /// the record's own API key/secret columns.
    async fn store_by_identity(
        &self,
        supplier_id: i64,
        store_id: i64,
        integrator: &str,
        api_key: &str,
        api_secret: &str,
    ) -> Result<Option<StoreRecord>, StorageError>;

    /// Sets a store's working status. Returns `false` when no row matched.
    async fn update_store_status(
        &self,
        supplier_id: i64,
        store_id: i64,
        status: WorkingStatus,
    ) -> Result<bool, StorageError>;

    /// Replaces a store's working hours, keyed by the full identity set.
    /// Returns `false` when no row matched.
    async fn update_store_hours(
        &self,
        supplier_id: i64,
        store_id: i64,
        integrator: &str,
        api_key: &str,
        api_secret: &str,
        hours: &[StoreWorkingHours],
    ) -> Result<bool, StorageError>;
}
