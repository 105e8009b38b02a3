//! Trendyol service: store listing, status updates, working hours.

use std::sync::Arc;

use rand::Rng;

use crate::domain::{StoreRecord, StoreWorkingHours, WorkingStatus};
use crate::error::ApiError;
use crate::storage::PlatformStore;

/// One page of a supplier's store list.
#[derive(Debug, Clone)]
pub struct StorePage {
    /// Stores on this page.
    pub stores: Vec<StoreRecord>,
    /// Total pages at the requested page size.
    pub total_pages: i64,
    /// Total matching stores.
    pub total_elements: i64,
}

/// Orchestrates the Trendyol endpoints over the injected store.
///
/// The list and status endpoints authenticate against the globally
/// configured API key pair; the working-hours endpoint authenticates
/// against each record's own key/secret columns.
#[derive(Debug, Clone)]
pub struct TrendyolService {
    store: Arc<dyn PlatformStore>,
    api_key: String,
    api_secret: String,
    conflict_probability: f64,
}

impl TrendyolService {
    /// Creates a new service.
    ///
    /// `conflict_probability` is the chance a status update answers with
    /// the simulated optimistic-lock conflict (0.0 disables it).
    #[must_use]
    pub fn new(
        store: Arc<dyn PlatformStore>,
        api_key: String,
        api_secret: String,
        conflict_probability: f64,
    ) -> Self {
        Self {
            store,
            api_key,
            api_secret,
            conflict_probability,
        }
    }

    /// Checks the `api-key`/`api-secret` header pair against the
    /// configured credentials.
    ///
    /// # Errors
    ///
    /// `Unauthorized` on a missing or mismatched pair.
    pub fn check_api_credentials(&self, pair: Option<(String, String)>) -> Result<(), ApiError> {
        match pair {
            Some((key, secret)) if key == self.api_key && secret == self.api_secret => Ok(()),
            _ => Err(ApiError::Unauthorized(
                "Unauthorized: Invalid API credentials".to_string(),
            )),
        }
    }

    /// Lists a supplier's stores with pagination.
    ///
    /// `page` is 1-indexed (default 1); `size` defaults to 10 and is
    /// capped at 50. A non-numeric supplier id matches nothing.
    ///
    /// # Errors
    ///
    /// `Backend` on lookup failure.
    pub async fn list_stores(
        &self,
        supplier_id_raw: &str,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<StorePage, ApiError> {
        let stores = match supplier_id_raw.parse::<i64>() {
            Ok(supplier_id) => self
                .store
                .stores_by_supplier(supplier_id)
                .await
                .map_err(|_| ApiError::Backend("Database error".to_string()))?,
            Err(_) => Vec::new(),
        };

        let page = page.unwrap_or(1).max(1);
        let size = size.unwrap_or(10).clamp(1, 50);
        let total_elements = stores.len() as i64;
        let total_pages = (total_elements + size - 1) / size;

        let start = (page - 1).saturating_mul(size) as usize;
        let paged = stores
            .into_iter()
            .skip(start)
            .take(size as usize)
            .collect();

        Ok(StorePage {
            stores: paged,
            total_pages,
            total_elements,
        })
    }

    /// Whether this status update should answer with the simulated
    /// optimistic-lock conflict.
    #[must_use]
    pub fn simulate_conflict(&self) -> bool {
        self.conflict_probability > 0.0
            && rand::thread_rng().r#gen::<f64>() < self.conflict_probability
    }

    /// Sets a store's working status.
    ///
    /// # Errors
    ///
    /// `InvalidInput` on a status outside `OPEN`/`CLOSED`, `Conflict` for
    /// the simulated optimistic-lock outcome, `NotFound` for an unknown
    /// store, `Backend` on write failure.
    pub async fn update_status(
        &self,
        supplier_id_raw: &str,
        store_id_raw: &str,
        status_raw: Option<&str>,
    ) -> Result<String, ApiError> {
        let status: WorkingStatus = status_raw
            .unwrap_or_default()
            .parse()
            .map_err(|()| {
                ApiError::InvalidInput("Invalid status. Must be 'OPEN' or 'CLOSED'".to_string())
            })?;

        if self.simulate_conflict() {
            return Err(ApiError::Conflict(
                "Conflict: Working status recently changed. Try again.".to_string(),
            ));
        }

        let ids = supplier_id_raw
            .parse::<i64>()
            .ok()
            .zip(store_id_raw.parse::<i64>().ok());
        let Some((supplier_id, store_id)) = ids else {
            return Err(ApiError::NotFound("Store not found".to_string()));
        };

        let found = self
            .store
            .update_store_status(supplier_id, store_id, status)
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?;
        if !found {
            return Err(ApiError::NotFound("Store not found".to_string()));
        }

        tracing::info!(supplier_id, store_id, status = status.as_str(), "store status updated");
        Ok(format!(
            "Store {store_id_raw} of supplier {supplier_id_raw} is now marked as '{status}'"
        ))
    }

    /// Replaces a store's working hours, locating the record by supplier,
    /// integrator, store id and the record's own API key/secret columns.
    ///
    /// # Errors
    ///
    /// `NotFound` when no record matches the full identity set, `Backend`
    /// on write failure.
    pub async fn update_working_hours(
        &self,
        supplier_id_raw: &str,
        store_id_raw: &str,
        integrator: &str,
        api_key: &str,
        api_secret: &str,
        hours: &[StoreWorkingHours],
    ) -> Result<(), ApiError> {
        let ids = supplier_id_raw
            .parse::<i64>()
            .ok()
            .zip(store_id_raw.parse::<i64>().ok());
        let Some((supplier_id, store_id)) = ids else {
            return Err(ApiError::NotFound(
                "Store not found or unauthorized".to_string(),
            ));
        };

        let record = self
            .store
            .store_by_identity(supplier_id, store_id, integrator, api_key, api_secret)
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?;
        if record.is_none() {
            return Err(ApiError::NotFound(
                "Store not found or unauthorized".to_string(),
            ));
        }

        let updated = self
            .store
            .update_store_hours(supplier_id, store_id, integrator, api_key, api_secret, hours)
            .await
            .map_err(|e| ApiError::Backend(e.to_string()))?;
        if !updated {
            return Err(ApiError::NotFound(
                "Store not found or unauthorized".to_string(),
            ));
        }

        tracing::info!(supplier_id, store_id, "store working hours updated");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn make_service() -> TrendyolService {
        TrendyolService::new(
            Arc::new(MemoryStore::seeded()),
            "mock-api-key".to_string(),
            "mock-api-secret".to_string(),
            0.0,
        )
    }

    fn creds(key: &str, secret: &str) -> Option<(String, String)> {
        Some((key.to_string(), secret.to_string()))
    }

    #[test]
    fn api_credentials_are_compared_exactly() {
        let service = make_service();
        assert!(service
            .check_api_credentials(creds("mock-api-key", "mock-api-secret"))
            .is_ok());
        let Err(ApiError::Unauthorized(msg)) =
            service.check_api_credentials(creds("mock-api-key", "wrong"))
        else {
            panic!("expected unauthorized");
        };
        assert_eq!(msg, "Unauthorized: Invalid API credentials");
        assert!(service.check_api_credentials(None).is_err());
    }

    #[tokio::test]
    async fn list_filters_by_supplier_and_paginates() {
        let service = make_service();
        let Ok(page) = service.list_stores("10", None, None).await else {
            panic!("list should succeed");
        };
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.stores.len(), 1);

        let Ok(page) = service.list_stores("99", None, None).await else {
            panic!("list should succeed");
        };
        assert_eq!(page.total_elements, 0);
        assert!(page.stores.is_empty());

        // Non-numeric supplier matches nothing rather than erroring.
        let Ok(page) = service.list_stores("not-a-number", None, None).await else {
            panic!("list should succeed");
        };
        assert_eq!(page.total_elements, 0);
    }

    #[tokio::test]
    async fn extreme_page_numbers_yield_an_empty_page() {
        let service = make_service();
        let Ok(page) = service.list_stores("10", Some(i64::MAX), Some(50)).await else {
            panic!("list should succeed");
        };
        assert!(page.stores.is_empty());
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn status_outside_the_enum_is_rejected_and_not_applied() {
        let service = make_service();
        let Err(ApiError::InvalidInput(msg)) =
            service.update_status("10", "1", Some("PAUSED")).await
        else {
            panic!("expected invalid input");
        };
        assert_eq!(msg, "Invalid status. Must be 'OPEN' or 'CLOSED'");

        let Ok(page) = service.list_stores("10", None, None).await else {
            panic!("list should succeed");
        };
        let Some(store) = page.stores.first() else {
            panic!("store should exist");
        };
        assert_eq!(store.working_status, WorkingStatus::Open);
    }

    #[tokio::test]
    async fn status_update_applies_and_reports_identifiers() {
        let service = make_service();
        let Ok(message) = service.update_status("10", "1", Some("CLOSED")).await else {
            panic!("update should succeed");
        };
        assert_eq!(message, "Store 1 of supplier 10 is now marked as 'CLOSED'");

        let Ok(page) = service.list_stores("10", None, None).await else {
            panic!("list should succeed");
        };
        let Some(store) = page.stores.first() else {
            panic!("store should exist");
        };
        assert_eq!(store.working_status, WorkingStatus::Closed);
    }

    #[tokio::test]
    async fn unknown_store_is_not_found() {
        let service = make_service();
        let Err(ApiError::NotFound(msg)) = service.update_status("10", "7", Some("OPEN")).await
        else {
            panic!("expected not found");
        };
        assert_eq!(msg, "Store not found");
    }

    #[tokio::test]
    async fn full_conflict_probability_always_conflicts() {
        let service = TrendyolService::new(
            Arc::new(MemoryStore::seeded()),
            "mock-api-key".to_string(),
            "mock-api-secret".to_string(),
            1.0,
        );
        let Err(ApiError::Conflict(msg)) = service.update_status("10", "1", Some("OPEN")).await
        else {
            panic!("expected conflict");
        };
        assert_eq!(msg, "Conflict: Working status recently changed. Try again.");
    }

    #[tokio::test]
    async fn working_hours_require_the_records_own_credentials() {
        let service = make_service();
        let hours = vec![StoreWorkingHours {
            day_of_week: "TUESDAY".to_string(),
            opening_time: "10:00:00".to_string(),
            closing_time: "20:00:00".to_string(),
        }];

        let Err(ApiError::NotFound(msg)) = service
            .update_working_hours("10", "1", "mock-integrator", "mock-api-key", "wrong", &hours)
            .await
        else {
            panic!("expected not found");
        };
        assert_eq!(msg, "Store not found or unauthorized");

        let Ok(()) = service
            .update_working_hours(
                "10",
                "1",
                "mock-integrator",
                "mock-api-key",
                "mock-api-secret",
                &hours,
            )
            .await
        else {
            panic!("update should succeed");
        };

        let Ok(page) = service.list_stores("10", None, None).await else {
            panic!("list should succeed");
        };
        let Some(store) = page.stores.first() else {
            panic!("store should exist");
        };
        assert_eq!(store.working_hours, hours);
    }
}
