//! Delivery Hero service: login grants and vendor availability.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;

use crate::domain::{AvailabilityState, AvailabilityUpdate, VendorRecord};
use crate::error::ApiError;
use crate::storage::PlatformStore;

/// Orchestrates the Delivery Hero endpoints over the injected store.
///
/// Every state-changing call follows the same sequence: validate
/// credentials, locate the record, validate the requested state, apply
/// the mutation, format the result.
#[derive(Debug, Clone)]
pub struct DeliveryHeroService {
    store: Arc<dyn PlatformStore>,
    ack_probability: f64,
}

impl DeliveryHeroService {
    /// Creates a new service.
    ///
    /// `ack_probability` is the chance that an availability GET answers
    /// 204 instead of a body (0.0 disables it, as tests do).
    #[must_use]
    pub fn new(store: Arc<dyn PlatformStore>, ack_probability: f64) -> Self {
        Self {
            store,
            ack_probability,
        }
    }

    /// Validates a bearer token against the stored access tokens.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when the token is missing or unknown, `Backend` when
    /// the lookup fails.
    pub async fn require_bearer(&self, token: Option<&str>) -> Result<(), ApiError> {
        let Some(token) = token else {
            return Err(ApiError::Unauthorized("Unauthorized".to_string()));
        };
        let known = self
            .store
            .vendor_token_exists(token)
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?;
        if known {
            Ok(())
        } else {
            Err(ApiError::Unauthorized("Unauthorized".to_string()))
        }
    }

    /// Exchanges form credentials for the vendor's stored access token.
    ///
    /// `grant_type` must be `client_credentials`; passwords are compared
    /// trimmed on both sides.
    ///
    /// # Errors
    ///
    /// `InvalidInput` on missing fields or wrong grant type,
    /// `Unauthorized` on unknown username or password mismatch,
    /// `Backend` when the lookup fails.
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
        grant_type: Option<&str>,
    ) -> Result<String, ApiError> {
        let (Some(username), Some(password)) = (username, password) else {
            return Err(invalid_login_request());
        };
        if username.is_empty() || password.is_empty() || grant_type != Some("client_credentials") {
            return Err(invalid_login_request());
        }

        let vendor = self
            .store
            .vendor_by_username(username)
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?;

        let Some(vendor) = vendor else {
            return Err(bad_credentials());
        };
        if vendor.password.trim() != password.trim() {
            return Err(bad_credentials());
        }

        Ok(vendor.access_token)
    }

    /// Returns every vendor registered under the chain + POS vendor key.
    ///
    /// # Errors
    ///
    /// `NotFound` when no vendor matches, `Backend` when the lookup fails.
    pub async fn availability(
        &self,
        chain_code: &str,
        pos_vendor_id: &str,
    ) -> Result<Vec<VendorRecord>, ApiError> {
        let vendors = self
            .store
            .vendors_by_key(chain_code, pos_vendor_id)
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?;
        if vendors.is_empty() {
            return Err(ApiError::NotFound("Not found".to_string()));
        }
        Ok(vendors)
    }

    /// Whether this GET should answer 204 (state acknowledged but not yet
    /// available), sampled at the configured probability.
    #[must_use]
    pub fn acknowledge_only(&self) -> bool {
        self.ack_probability > 0.0 && rand::thread_rng().r#gen::<f64>() < self.ack_probability
    }

    /// Applies an availability update to one vendor.
    ///
    /// Sequence: validate the state enum, locate the record by the full
    /// identity triple (the body's `platformRestaurantId` participates in
    /// the lookup, so a mismatch is a 404), cross-check `platformKey`,
    /// honor the `changeable` flag, validate `closedReason` against the
    /// record's own list, then write only the supplied fields.
    ///
    /// # Errors
    ///
    /// `InvalidInput`, `NotFound`, or `Backend` per the sequence above.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_availability(
        &self,
        chain_code: &str,
        pos_vendor_id: &str,
        state_raw: Option<&str>,
        platform_key: Option<&str>,
        platform_restaurant_id: Option<&str>,
        closed_reason: Option<&str>,
        closing_minutes: Option<i64>,
    ) -> Result<String, ApiError> {
        let state: AvailabilityState = state_raw
            .unwrap_or_default()
            .parse()
            .map_err(|()| ApiError::InvalidInput("Invalid availabilityState".to_string()))?;

        let vendor = self
            .store
            .vendor_by_identity(
                chain_code,
                pos_vendor_id,
                platform_restaurant_id.unwrap_or_default(),
            )
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?
            .ok_or_else(|| ApiError::NotFound("Restaurant not found".to_string()))?;

        if platform_key != Some(vendor.platform_key.as_str()) {
            return Err(ApiError::InvalidInput("Invalid platformKey".to_string()));
        }
        if !vendor.changeable {
            return Err(ApiError::InvalidInput(
                "Availability change not allowed".to_string(),
            ));
        }
        if let Some(reason) = closed_reason {
            if !vendor.closing_reasons.iter().any(|r| r == reason) {
                return Err(ApiError::InvalidInput("Invalid closedReason".to_string()));
            }
        }

        // Out-of-range durations skip the derived timestamp instead of
        // aborting the update.
        let closed_until = match (state, closing_minutes) {
            (AvailabilityState::ClosedUntil, Some(minutes)) => Duration::try_minutes(minutes)
                .and_then(|d| Utc::now().checked_add_signed(d)),
            _ => None,
        };
        let update = AvailabilityUpdate {
            availability_state: state,
            closing_reason: closed_reason.map(str::to_string),
            closing_minutes,
            closed_until,
        };

        self.store
            .update_vendor_availability(
                chain_code,
                pos_vendor_id,
                platform_restaurant_id.unwrap_or_default(),
                &update,
            )
            .await
            .map_err(|_| ApiError::Backend("Failed to update availability status".to_string()))?;

        tracing::info!(
            chain_code,
            pos_vendor_id,
            state = state.as_str(),
            "vendor availability updated"
        );
        Ok(format!("Availability status updated to '{state}'"))
    }
}

fn invalid_login_request() -> ApiError {
    ApiError::InvalidInput(
        "Invalid request. Make sure username, password and grant_type are provided.".to_string(),
    )
}

fn bad_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid username or password".to_string())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn make_service() -> DeliveryHeroService {
        DeliveryHeroService::new(Arc::new(MemoryStore::seeded()), 0.0)
    }

    #[tokio::test]
    async fn login_requires_client_credentials_grant() {
        let service = make_service();
        let result = service
            .login(Some("mock-username"), Some("mock-password"), Some("password"))
            .await;
        let Err(ApiError::InvalidInput(msg)) = result else {
            panic!("expected invalid input");
        };
        assert!(msg.contains("grant_type"));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let service = make_service();
        let result = service
            .login(
                Some("mock-username"),
                Some("wrong"),
                Some("client_credentials"),
            )
            .await;
        let Err(ApiError::Unauthorized(msg)) = result else {
            panic!("expected unauthorized");
        };
        assert_eq!(msg, "Invalid username or password");
    }

    #[tokio::test]
    async fn login_trims_password_and_returns_stored_token() {
        let service = make_service();
        let Ok(token) = service
            .login(
                Some("mock-username"),
                Some("mock-password  "),
                Some("client_credentials"),
            )
            .await
        else {
            panic!("login should succeed");
        };
        assert_eq!(token, "mock-valid-jwt-token");
    }

    #[tokio::test]
    async fn bearer_validation_checks_stored_tokens() {
        let service = make_service();
        assert!(service.require_bearer(Some("mock-valid-jwt-token")).await.is_ok());
        assert!(service.require_bearer(Some("forged")).await.is_err());
        assert!(service.require_bearer(None).await.is_err());
    }

    #[tokio::test]
    async fn invalid_state_is_rejected_before_anything_else() {
        let service = make_service();
        let result = service
            .update_availability(
                "foo-chainId",
                "fooPosVendorId123",
                Some("HALF_OPEN"),
                Some("dh-platform"),
                Some("123456789"),
                None,
                None,
            )
            .await;
        let Err(ApiError::InvalidInput(msg)) = result else {
            panic!("expected invalid input");
        };
        assert_eq!(msg, "Invalid availabilityState");
    }

    #[tokio::test]
    async fn mismatched_platform_restaurant_id_is_not_found() {
        let service = make_service();
        let result = service
            .update_availability(
                "foo-chainId",
                "fooPosVendorId123",
                Some("OPEN"),
                Some("dh-platform"),
                Some("999"),
                None,
                None,
            )
            .await;
        let Err(ApiError::NotFound(msg)) = result else {
            panic!("expected not found");
        };
        assert_eq!(msg, "Restaurant not found");
    }

    #[tokio::test]
    async fn mismatched_platform_key_is_rejected() {
        let service = make_service();
        let result = service
            .update_availability(
                "foo-chainId",
                "fooPosVendorId123",
                Some("OPEN"),
                Some("wrong-key"),
                Some("123456789"),
                None,
                None,
            )
            .await;
        let Err(ApiError::InvalidInput(msg)) = result else {
            panic!("expected invalid input");
        };
        assert_eq!(msg, "Invalid platformKey");
    }

    #[tokio::test]
    async fn unchangeable_vendor_rejects_any_update() {
        let store = Arc::new(MemoryStore::new());
        let mut vendor = crate::storage::memory::demo_vendor();
        vendor.changeable = false;
        store.insert_vendor(vendor).await;
        let service = DeliveryHeroService::new(store, 0.0);

        let result = service
            .update_availability(
                "foo-chainId",
                "fooPosVendorId123",
                Some("OPEN"),
                Some("dh-platform"),
                Some("123456789"),
                None,
                None,
            )
            .await;
        let Err(ApiError::InvalidInput(msg)) = result else {
            panic!("expected invalid input");
        };
        assert_eq!(msg, "Availability change not allowed");

        // The stored state is untouched.
        let Ok(vendors) = service.availability("foo-chainId", "fooPosVendorId123").await else {
            panic!("vendor should resolve");
        };
        let Some(vendor) = vendors.first() else {
            panic!("vendor should exist");
        };
        assert_eq!(vendor.availability_state, AvailabilityState::ClosedUntil);
    }

    #[tokio::test]
    async fn closed_reason_must_come_from_the_records_own_list() {
        let service = make_service();
        let result = service
            .update_availability(
                "foo-chainId",
                "fooPosVendorId123",
                Some("CLOSED_UNTIL"),
                Some("dh-platform"),
                Some("123456789"),
                Some("ALIENS"),
                Some(30),
            )
            .await;
        let Err(ApiError::InvalidInput(msg)) = result else {
            panic!("expected invalid input");
        };
        assert_eq!(msg, "Invalid closedReason");
    }

    #[tokio::test]
    async fn valid_update_is_applied_and_visible_on_read() {
        let service = make_service();
        let Ok(message) = service
            .update_availability(
                "foo-chainId",
                "fooPosVendorId123",
                Some("OPEN"),
                Some("dh-platform"),
                Some("123456789"),
                None,
                None,
            )
            .await
        else {
            panic!("update should succeed");
        };
        assert_eq!(message, "Availability status updated to 'OPEN'");

        let Ok(vendors) = service.availability("foo-chainId", "fooPosVendorId123").await else {
            panic!("vendor should resolve");
        };
        let Some(vendor) = vendors.first() else {
            panic!("vendor should exist");
        };
        assert_eq!(vendor.availability_state, AvailabilityState::Open);
    }

    #[tokio::test]
    async fn closed_until_update_derives_reopening_time() {
        let service = make_service();
        let before = Utc::now();
        let Ok(_) = service
            .update_availability(
                "foo-chainId",
                "fooPosVendorId123",
                Some("CLOSED_UNTIL"),
                Some("dh-platform"),
                Some("123456789"),
                Some("TECHNICAL_PROBLEM"),
                Some(45),
            )
            .await
        else {
            panic!("update should succeed");
        };

        let Ok(vendors) = service.availability("foo-chainId", "fooPosVendorId123").await else {
            panic!("vendor should resolve");
        };
        let Some(vendor) = vendors.first() else {
            panic!("vendor should exist");
        };
        assert_eq!(vendor.closing_reason.as_deref(), Some("TECHNICAL_PROBLEM"));
        assert_eq!(vendor.closing_minutes, 45);
        let Some(closed_until) = vendor.closed_until else {
            panic!("closed_until should be set");
        };
        assert!(closed_until >= before + Duration::minutes(44));
    }

    #[tokio::test]
    async fn oversized_closing_minutes_skip_the_derived_timestamp() {
        let service = make_service();
        let Ok(message) = service
            .update_availability(
                "foo-chainId",
                "fooPosVendorId123",
                Some("CLOSED_UNTIL"),
                Some("dh-platform"),
                Some("123456789"),
                Some("OTHER"),
                Some(i64::MAX),
            )
            .await
        else {
            panic!("update should succeed");
        };
        assert_eq!(message, "Availability status updated to 'CLOSED_UNTIL'");

        let Ok(vendors) = service.availability("foo-chainId", "fooPosVendorId123").await else {
            panic!("vendor should resolve");
        };
        let Some(vendor) = vendors.first() else {
            panic!("vendor should exist");
        };
        assert_eq!(vendor.availability_state, AvailabilityState::ClosedUntil);
        assert_eq!(vendor.closing_minutes, i64::MAX);
    }

    #[tokio::test]
    async fn unknown_chain_is_not_found() {
        let service = make_service();
        let Err(ApiError::NotFound(msg)) = service.availability("nope", "nope").await else {
            panic!("expected not found");
        };
        assert_eq!(msg, "Not found");
    }
}
