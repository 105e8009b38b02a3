//! Getir request/response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DaySchedule, RestaurantRecord};
use crate::service::RestaurantGrant;

/// Login request carrying the secret-key pair.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetirLoginRequest {
    /// Application-level secret.
    pub app_secret_key: Option<String>,
    /// Restaurant-level secret.
    pub restaurant_secret_key: Option<String>,
}

/// Login response: the restaurant id and its session token.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetirLoginResponse {
    /// Platform restaurant identifier.
    pub restaurant_id: String,
    /// Token for the `token` request header.
    pub token: String,
}

impl From<RestaurantGrant> for GetirLoginResponse {
    fn from(grant: RestaurantGrant) -> Self {
        Self {
            restaurant_id: grant.restaurant_id,
            token: grant.token,
        }
    }
}

/// Restaurant info as the GET endpoint returns it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
    /// Platform restaurant identifier.
    pub id: String,
    /// Average order preparation time in minutes.
    pub average_preparation_time: i64,
    /// Numeric status code, `1` open / `2` closed.
    pub status: i32,
    /// Whether a courier is currently available.
    pub is_courier_available: bool,
    /// Display name.
    pub name: String,
    /// Whether the current status was set through the partner API.
    pub is_status_changed_by_user: bool,
    /// Who closed the restaurant (0 = not closed, 1 = restaurant).
    pub closed_source: i64,
}

impl From<RestaurantRecord> for RestaurantResponse {
    fn from(record: RestaurantRecord) -> Self {
        Self {
            id: record.restaurant_id,
            average_preparation_time: record.average_preparation_time,
            status: record.status.code(),
            is_courier_available: record.is_courier_available,
            name: record.name,
            is_status_changed_by_user: record.is_status_changed_by_user,
            closed_source: record.closed_source,
        }
    }
}

/// Close request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloseRequest {
    /// Closure duration in minutes, one of 15/30/45.
    pub time_off_amount: Option<i64>,
}

/// Weekly restaurant and courier schedules.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursResponse {
    /// Seven restaurant-hours entries in day order.
    pub restaurant_working_hours: Vec<DaySchedule>,
    /// Seven courier-hours entries in day order.
    pub restaurant_courier_hours: Vec<DaySchedule>,
}
