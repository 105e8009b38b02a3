//! In-memory `PlatformStore` used by tests and standalone operation.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use super::{PlatformStore, StorageError};
use crate::domain::getir::default_week;
use crate::domain::{
    AvailabilityState, AvailabilityUpdate, DaySchedule, RestaurantRecord, RestaurantStatus,
    StoreRecord, StoreWorkingHours, VendorRecord, WorkingStatus,
};

/// In-memory tables behind `tokio::sync::RwLock`.
///
/// Start empty via [`MemoryStore::new`] for tests, or with the sandbox
/// fixtures via [`MemoryStore::seeded`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    vendors: RwLock<Vec<VendorRecord>>,
    restaurants: RwLock<Vec<RestaurantRecord>>,
    stores: RwLock<Vec<StoreRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with one record per platform, matching
    /// the sandbox's documented demo credentials.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            vendors: RwLock::new(vec![demo_vendor()]),
            restaurants: RwLock::new(vec![demo_restaurant()]),
            stores: RwLock::new(vec![demo_store()]),
        }
    }

    /// Inserts a vendor record (test seeding).
    pub async fn insert_vendor(&self, record: VendorRecord) {
        self.vendors.write().await.push(record);
    }

    /// Inserts a restaurant record (test seeding).
    pub async fn insert_restaurant(&self, record: RestaurantRecord) {
        self.restaurants.write().await.push(record);
    }

    /// Inserts a store record (test seeding).
    pub async fn insert_store(&self, record: StoreRecord) {
        self.stores.write().await.push(record);
    }
}

/// The seeded Delivery Hero vendor (`foo-chainId` / `fooPosVendorId123`).
#[must_use]
pub fn demo_vendor() -> VendorRecord {
    VendorRecord {
        chain_code: "foo-chainId".to_string(),
        pos_vendor_id: "fooPosVendorId123".to_string(),
        platform_restaurant_id: "123456789".to_string(),
        username: "mock-username".to_string(),
        password: "mock-password".to_string(),
        access_token: "mock-valid-jwt-token".to_string(),
        platform_id: "deliveryhero-tr".to_string(),
        platform_type: "delivery".to_string(),
        platform_key: "dh-platform".to_string(),
        availability_state: AvailabilityState::ClosedUntil,
        changeable: true,
        closing_reason: Some("TOO_BUSY_KITCHEN".to_string()),
        closing_minutes: 30,
        closed_until: Some(Utc::now() + Duration::hours(1)),
        next_opening_at: Some(Utc::now() + Duration::hours(1)),
        availability_states: vec![
            AvailabilityState::Open,
            AvailabilityState::Closed,
            AvailabilityState::ClosedUntil,
        ],
        closing_reasons: vec![
            "TOO_BUSY_KITCHEN".to_string(),
            "TECHNICAL_PROBLEM".to_string(),
            "ORDER_FAILURE".to_string(),
            "OTHER".to_string(),
        ],
    }
}

/// The seeded Getir restaurant (`mock-restaurant-123`).
#[must_use]
pub fn demo_restaurant() -> RestaurantRecord {
    RestaurantRecord {
        restaurant_id: "mock-restaurant-123".to_string(),
        app_secret_key: "yourAppSecretKey".to_string(),
        restaurant_secret_key: "yourRestaurantSecretKey".to_string(),
        token: "mock-jwt-token-abc123xyz".to_string(),
        name: "Mock Burger House".to_string(),
        average_preparation_time: 20,
        status: RestaurantStatus::Open,
        is_courier_available: true,
        is_status_changed_by_user: false,
        closed_source: 0,
        time_off_amount: None,
        working_hours: default_week(),
        courier_hours: default_week(),
    }
}

/// The seeded Trendyol store (`Mock Restoran`, supplier 10, store 1).
#[must_use]
pub fn demo_store() -> StoreRecord {
    StoreRecord {
        id: 1,
        supplier_id: 10,
        integrator: "mock-integrator".to_string(),
        api_key: "mock-api-key".to_string(),
        api_secret: "mock-api-secret".to_string(),
        name: "Mock Restoran".to_string(),
        address: "123 Mock Street, Istanbul".to_string(),
        longitude: "29.00".to_string(),
        latitude: "41.00".to_string(),
        phone_number: "902120000000".to_string(),
        email: "iletisim@email.com".to_string(),
        working_status: WorkingStatus::Open,
        average_order_preparation_time_in_min: 15,
        delivery_type: "GO".to_string(),
        creation_date: 1_606_397_225_000,
        last_modified_date: 1_606_397_225_000,
        working_hours: vec![StoreWorkingHours {
            day_of_week: "MONDAY".to_string(),
            opening_time: "08:00:00".to_string(),
            closing_time: "12:00:00".to_string(),
        }],
    }
}

#[async_trait]
impl PlatformStore for MemoryStore {
    async fn vendor_by_username(
        &self,
        username: &str,
    ) -> Result<Option<VendorRecord>, StorageError> {
        let vendors = self.vendors.read().await;
        Ok(vendors.iter().find(|v| v.username == username).cloned())
    }

    async fn vendor_token_exists(&self, token: &str) -> Result<bool, StorageError> {
        let vendors = self.vendors.read().await;
        Ok(vendors.iter().any(|v| v.access_token == token))
    }

    async fn vendors_by_key(
        &self,
        chain_code: &str,
        pos_vendor_id: &str,
    ) -> Result<Vec<VendorRecord>, StorageError> {
        let vendors = self.vendors.read().await;
        Ok(vendors
            .iter()
            .filter(|v| v.chain_code == chain_code && v.pos_vendor_id == pos_vendor_id)
            .cloned()
            .collect())
    }

    async fn vendor_by_identity(
        &self,
        chain_code: &str,
        pos_vendor_id: &str,
        platform_restaurant_id: &str,
    ) -> Result<Option<VendorRecord>, StorageError> {
        let vendors = self.vendors.read().await;
        Ok(vendors
            .iter()
            .find(|v| {
                v.chain_code == chain_code
                    && v.pos_vendor_id == pos_vendor_id
                    && v.platform_restaurant_id == platform_restaurant_id
            })
            .cloned())
    }

    async fn update_vendor_availability(
        &self,
        chain_code: &str,
        pos_vendor_id: &str,
        platform_restaurant_id: &str,
        update: &AvailabilityUpdate,
    ) -> Result<(), StorageError> {
        let mut vendors = self.vendors.write().await;
        if let Some(vendor) = vendors.iter_mut().find(|v| {
            v.chain_code == chain_code
                && v.pos_vendor_id == pos_vendor_id
                && v.platform_restaurant_id == platform_restaurant_id
        }) {
            vendor.availability_state = update.availability_state;
            if let Some(reason) = &update.closing_reason {
                vendor.closing_reason = Some(reason.clone());
            }
            if let Some(minutes) = update.closing_minutes {
                vendor.closing_minutes = minutes;
            }
            if let Some(until) = update.closed_until {
                vendor.closed_until = Some(until);
                vendor.next_opening_at = Some(until);
            }
        }
        Ok(())
    }

    async fn restaurant_by_secret(
        &self,
        restaurant_secret_key: &str,
    ) -> Result<Option<RestaurantRecord>, StorageError> {
        let restaurants = self.restaurants.read().await;
        Ok(restaurants
            .iter()
            .find(|r| r.restaurant_secret_key == restaurant_secret_key)
            .cloned())
    }

    async fn restaurant_by_token(
        &self,
        token: &str,
    ) -> Result<Option<RestaurantRecord>, StorageError> {
        let restaurants = self.restaurants.read().await;
        Ok(restaurants.iter().find(|r| r.token == token).cloned())
    }

    async fn update_restaurant_status(
        &self,
        restaurant_id: &str,
        status: RestaurantStatus,
        time_off_amount: Option<i64>,
    ) -> Result<(), StorageError> {
        let mut restaurants = self.restaurants.write().await;
        if let Some(restaurant) = restaurants
            .iter_mut()
            .find(|r| r.restaurant_id == restaurant_id)
        {
            restaurant.status = status;
            restaurant.is_status_changed_by_user = true;
            restaurant.time_off_amount = time_off_amount;
            restaurant.closed_source = match status {
                RestaurantStatus::Open => 0,
                RestaurantStatus::Closed => 1,
            };
        }
        Ok(())
    }

    async fn update_restaurant_hours(
        &self,
        restaurant_id: &str,
        hours: &[DaySchedule],
    ) -> Result<(), StorageError> {
        let mut restaurants = self.restaurants.write().await;
        if let Some(restaurant) = restaurants
            .iter_mut()
            .find(|r| r.restaurant_id == restaurant_id)
        {
            restaurant.working_hours = hours.to_vec();
        }
        Ok(())
    }

    async fn stores_by_supplier(
        &self,
        supplier_id: i64,
    ) -> Result<Vec<StoreRecord>, StorageError> {
        let stores = self.stores.read().await;
        Ok(stores
            .iter()
            .filter(|s| s.supplier_id == supplier_id)
            .cloned()
            .collect())
    }

    async fn store_by_identity(
        &self,
        supplier_id: i64,
        store_id: i64,
        integrator: &str,
        api_key: &str,
        api_secret: &str,
    ) -> Result<Option<StoreRecord>, StorageError> {
        let stores = self.stores.read().await;
        Ok(stores
            .iter()
            .find(|s| {
                s.supplier_id == supplier_id
                    && s.id == store_id
                    && s.integrator == integrator
                    && s.api_key == api_key
                    && s.api_secret == api_secret
            })
            .cloned())
    }

    async fn update_store_status(
        &self,
        supplier_id: i64,
        store_id: i64,
        status: WorkingStatus,
    ) -> Result<bool, StorageError> {
        let mut stores = self.stores.write().await;
        match stores
            .iter_mut()
            .find(|s| s.supplier_id == supplier_id && s.id == store_id)
        {
            Some(store) => {
                store.working_status = status;
                store.last_modified_date = Utc::now().timestamp_millis();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_store_hours(
        &self,
        supplier_id: i64,
        store_id: i64,
        integrator: &str,
        api_key: &str,
        api_secret: &str,
        hours: &[StoreWorkingHours],
    ) -> Result<bool, StorageError> {
        let mut stores = self.stores.write().await;
        match stores.iter_mut().find(|s| {
            s.supplier_id == supplier_id
                && s.id == store_id
                && s.integrator == integrator
                && s.api_key == api_key
                && s.api_secret == api_secret
        }) {
            Some(store) => {
                store.working_hours = hours.to_vec();
                store.last_modified_date = Utc::now().timestamp_millis();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_fixtures_resolve_by_identity() {
        let store = MemoryStore::seeded();

        let Ok(Some(vendor)) = store
            .vendor_by_identity("foo-chainId", "fooPosVendorId123", "123456789")
            .await
        else {
            panic!("seeded vendor should resolve");
        };
        assert_eq!(vendor.platform_key, "dh-platform");

        let Ok(Some(restaurant)) = store.restaurant_by_token("mock-jwt-token-abc123xyz").await
        else {
            panic!("seeded restaurant should resolve");
        };
        assert_eq!(restaurant.restaurant_id, "mock-restaurant-123");

        let Ok(stores) = store.stores_by_supplier(10).await else {
            panic!("seeded supplier should resolve");
        };
        assert_eq!(stores.len(), 1);
    }

    #[tokio::test]
    async fn availability_update_leaves_unsupplied_fields_untouched() {
        let store = MemoryStore::seeded();
        let update = AvailabilityUpdate {
            availability_state: AvailabilityState::Open,
            closing_reason: None,
            closing_minutes: None,
            closed_until: None,
        };
        let Ok(()) = store
            .update_vendor_availability("foo-chainId", "fooPosVendorId123", "123456789", &update)
            .await
        else {
            panic!("update should succeed");
        };

        let Ok(Some(vendor)) = store
            .vendor_by_identity("foo-chainId", "fooPosVendorId123", "123456789")
            .await
        else {
            panic!("vendor should resolve");
        };
        assert_eq!(vendor.availability_state, AvailabilityState::Open);
        // Reason and minutes were not part of the update.
        assert_eq!(vendor.closing_reason.as_deref(), Some("TOO_BUSY_KITCHEN"));
        assert_eq!(vendor.closing_minutes, 30);
    }

    #[tokio::test]
    async fn store_status_update_reports_missing_rows() {
        let store = MemoryStore::seeded();
        let Ok(found) = store.update_store_status(10, 1, WorkingStatus::Closed).await else {
            panic!("update should succeed");
        };
        assert!(found);
        let Ok(found) = store.update_store_status(99, 1, WorkingStatus::Closed).await else {
            panic!("update should succeed");
        };
        assert!(!found);
    }
}
