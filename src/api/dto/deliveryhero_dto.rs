//! Delivery Hero request/response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::VendorRecord;

/// Form-encoded login body (`application/x-www-form-urlencoded`).
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Login username.
    pub username: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// OAuth grant type, must be `client_credentials`.
    pub grant_type: Option<String>,
}

/// Successful login grant.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the availability endpoints.
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// Always `bearer`.
    pub token_type: String,
}

impl LoginResponse {
    /// Wraps an issued token in the platform's grant shape.
    #[must_use]
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            expires_in: 1800,
            token_type: "bearer".to_string(),
        }
    }
}

/// Availability view of one vendor, as the GET endpoint returns it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorAvailabilityDto {
    /// Current availability state.
    pub availability_state: String,
    /// Whether the state may currently be mutated.
    pub changeable: bool,
    /// Current closing reason, if any.
    pub closed_reason: Option<String>,
    /// Platform-side restaurant identifier.
    pub platform_restaurant_id: String,
    /// Platform identifier.
    pub platform_id: String,
    /// Platform type.
    pub platform_type: String,
    /// Platform key.
    pub platform_key: String,
    /// Closed-until timestamp, when closed until a known time.
    pub closed_until: Option<DateTime<Utc>>,
    /// Next scheduled opening, if known.
    pub next_opening_at: Option<DateTime<Utc>>,
    /// States this vendor may be switched between.
    pub availability_states: Vec<String>,
    /// Closing reasons this vendor accepts.
    pub closing_reasons: Vec<String>,
    /// Current closing duration, wrapped as a one-element list.
    pub closing_minutes: Vec<i64>,
}

impl From<VendorRecord> for VendorAvailabilityDto {
    fn from(record: VendorRecord) -> Self {
        Self {
            availability_state: record.availability_state.as_str().to_string(),
            changeable: record.changeable,
            closed_reason: record.closing_reason,
            platform_restaurant_id: record.platform_restaurant_id,
            platform_id: record.platform_id,
            platform_type: record.platform_type,
            platform_key: record.platform_key,
            closed_until: record.closed_until,
            next_opening_at: record.next_opening_at,
            availability_states: record
                .availability_states
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            closing_reasons: record.closing_reasons,
            closing_minutes: vec![record.closing_minutes],
        }
    }
}

/// Availability update request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityRequest {
    /// Target availability state.
    pub availability_state: Option<String>,
    /// Platform key, cross-checked against the record.
    pub platform_key: Option<String>,
    /// Platform restaurant id, part of the record lookup.
    pub platform_restaurant_id: Option<String>,
    /// Closing reason, validated against the record's own list.
    pub closed_reason: Option<String>,
    /// Closing duration in minutes.
    pub closing_minutes: Option<i64>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::storage::memory::demo_vendor;

    #[test]
    fn availability_view_reshapes_column_names() {
        let dto = VendorAvailabilityDto::from(demo_vendor());
        let Ok(value) = serde_json::to_value(&dto) else {
            panic!("serialization should succeed");
        };
        assert_eq!(value.get("availabilityState").and_then(|v| v.as_str()), Some("CLOSED_UNTIL"));
        assert_eq!(value.get("closedReason").and_then(|v| v.as_str()), Some("TOO_BUSY_KITCHEN"));
        assert_eq!(value.get("changeable").and_then(|v| v.as_bool()), Some(true));
        let Some(minutes) = value.get("closingMinutes").and_then(|v| v.as_array()) else {
            panic!("closingMinutes should be a list");
        };
        assert_eq!(minutes.len(), 1);
    }

    #[test]
    fn update_request_accepts_partial_bodies() {
        let Ok(req) = serde_json::from_str::<UpdateAvailabilityRequest>(
            r#"{"availabilityState":"OPEN","platformKey":"dh-platform","platformRestaurantId":"123456789"}"#,
        ) else {
            panic!("deserialization should succeed");
        };
        assert_eq!(req.availability_state.as_deref(), Some("OPEN"));
        assert!(req.closed_reason.is_none());
        assert!(req.closing_minutes.is_none());
    }
}
