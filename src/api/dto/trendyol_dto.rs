//! Trendyol request/response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{StoreRecord, StoreWorkingHours};
use crate::service::StorePage;

/// Geographic position, serialized as a nested object.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreLocation {
    /// Longitude as the platform serializes it (string).
    pub longitude: String,
    /// Latitude as the platform serializes it (string).
    pub latitude: String,
}

/// One store as the list endpoint returns it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreDto {
    /// Store identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Supplier the store belongs to.
    pub supplier_id: i64,
    /// Current open/closed status, `OPEN` or `CLOSED`.
    pub working_status: String,
    /// Street address.
    pub address: String,
    /// Geographic position.
    pub location: StoreLocation,
    /// Average order preparation time in minutes.
    pub average_order_preparation_time_in_min: i64,
    /// Delivery type (e.g. `GO`).
    pub delivery_type: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Contact e-mail.
    pub email: String,
    /// Record creation, epoch milliseconds.
    pub creation_date: i64,
    /// Last modification, epoch milliseconds.
    pub last_modified_date: i64,
    /// Weekly working hours.
    pub working_hours: Vec<StoreWorkingHours>,
}

impl From<StoreRecord> for StoreDto {
    fn from(record: StoreRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            supplier_id: record.supplier_id,
            working_status: record.working_status.as_str().to_string(),
            address: record.address,
            location: StoreLocation {
                longitude: record.longitude,
                latitude: record.latitude,
            },
            average_order_preparation_time_in_min: record.average_order_preparation_time_in_min,
            delivery_type: record.delivery_type,
            phone_number: record.phone_number,
            email: record.email,
            creation_date: record.creation_date,
            last_modified_date: record.last_modified_date,
            working_hours: record.working_hours,
        }
    }
}

/// Paged store-list response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreListResponse {
    /// Stores on this page.
    pub restaurants: Vec<StoreDto>,
    /// Total pages at the requested page size.
    pub total_pages: i64,
    /// Total matching stores.
    pub total_elements: i64,
}

impl From<StorePage> for StoreListResponse {
    fn from(page: StorePage) -> Self {
        Self {
            restaurants: page.stores.into_iter().map(StoreDto::from).collect(),
            total_pages: page.total_pages,
            total_elements: page.total_elements,
        }
    }
}

/// Status update request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    /// Target status, `OPEN` or `CLOSED`.
    pub status: Option<String>,
}

/// Working-hours update confirmation, echoing the stored windows.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursUpdateResponse {
    /// Confirmation message.
    pub message: String,
    /// The windows as stored.
    pub working_hours: Vec<StoreWorkingHours>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::storage::memory::demo_store;

    #[test]
    fn store_view_nests_the_location() {
        let dto = StoreDto::from(demo_store());
        let Ok(value) = serde_json::to_value(&dto) else {
            panic!("serialization should succeed");
        };
        assert_eq!(value.get("supplierId").and_then(|v| v.as_i64()), Some(10));
        assert_eq!(value.get("workingStatus").and_then(|v| v.as_str()), Some("OPEN"));
        let Some(location) = value.get("location") else {
            panic!("location should be present");
        };
        assert_eq!(location.get("longitude").and_then(|v| v.as_str()), Some("29.00"));
        let Some(hours) = value.get("workingHours").and_then(|v| v.as_array()) else {
            panic!("workingHours should be a list");
        };
        assert_eq!(
            hours.first().and_then(|h| h.get("dayOfWeek")).and_then(|v| v.as_str()),
            Some("MONDAY")
        );
    }

    #[test]
    fn page_view_carries_pagination_totals() {
        let page = StorePage {
            stores: vec![demo_store()],
            total_pages: 1,
            total_elements: 1,
        };
        let response = StoreListResponse::from(page);
        assert_eq!(response.restaurants.len(), 1);
        assert_eq!(response.total_pages, 1);
        assert_eq!(response.total_elements, 1);
    }
}
