//! Getir domain model: restaurant records, status codes, day schedules.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Time-off durations (minutes) the close endpoint accepts.
pub const TIME_OFF_AMOUNTS: [i64; 3] = [15, 30, 45];

/// Restaurant status as Getir encodes it: a numeric code on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestaurantStatus {
    /// Accepting orders.
    Open,
    /// Temporarily closed.
    Closed,
}

impl RestaurantStatus {
    /// Numeric wire code (`1` open, `2` closed).
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Open => 1,
            Self::Closed => 2,
        }
    }

    /// Decodes a stored numeric code; anything but `2` reads as open.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            2 => Self::Closed,
            _ => Self::Open,
        }
    }
}

/// Opening window of a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkingWindow {
    /// Opening time, `HH:MM`.
    pub start_time: String,
    /// Closing time, `HH:MM`.
    pub end_time: String,
    /// Whether the restaurant is closed the whole day.
    pub closed: bool,
}

/// One day of the weekly schedule. Day index runs 0–6.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// Day index, 0–6.
    pub day: i64,
    /// The day's opening window.
    pub working_hours: WorkingWindow,
}

/// Builds a default full week: seven days, 09:00–21:00, none closed.
#[must_use]
pub fn default_week() -> Vec<DaySchedule> {
    (0..7)
        .map(|day| DaySchedule {
            day,
            working_hours: WorkingWindow {
                start_time: "09:00".to_string(),
                end_time: "21:00".to_string(),
                closed: false,
            },
        })
        .collect()
}

/// One restaurant as Getir sees it.
#[derive(Debug, Clone)]
pub struct RestaurantRecord {
    /// Platform restaurant identifier.
    pub restaurant_id: String,
    /// Application-level secret, first half of the login pair.
    pub app_secret_key: String,
    /// Restaurant-level secret, second half of the login pair.
    pub restaurant_secret_key: String,
    /// Token issued by the login endpoint, sent back in the `token` header.
    pub token: String,
    /// Display name.
    pub name: String,
    /// Average order preparation time in minutes.
    pub average_preparation_time: i64,
    /// Current open/closed status.
    pub status: RestaurantStatus,
    /// Whether a courier is currently available.
    pub is_courier_available: bool,
    /// Whether the current status was set through the partner API.
    pub is_status_changed_by_user: bool,
    /// Who closed the restaurant (0 = not closed, 1 = restaurant).
    pub closed_source: i64,
    /// Minutes of the last applied closure, if any.
    pub time_off_amount: Option<i64>,
    /// Weekly restaurant hours, always seven entries in day order.
    pub working_hours: Vec<DaySchedule>,
    /// Weekly courier hours, always seven entries in day order.
    pub courier_hours: Vec<DaySchedule>,
}
