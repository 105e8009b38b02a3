//! Trendyol domain model: store records and working status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Working status of a Trendyol store. Only two states exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkingStatus {
    /// Store is open.
    Open,
    /// Store is closed.
    Closed,
}

impl WorkingStatus {
    /// The wire representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for WorkingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkingStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(()),
        }
    }
}

/// One working-hours window, keyed by weekday name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreWorkingHours {
    /// Weekday name (e.g. `MONDAY`).
    pub day_of_week: String,
    /// Opening time, `HH:MM:SS`.
    pub opening_time: String,
    /// Closing time, `HH:MM:SS`.
    pub closing_time: String,
}

/// One store as Trendyol sees it.
///
/// The working-hours endpoint authenticates against the record's own
/// API key/secret columns scoped by supplier + integrator; the list and
/// status endpoints use the globally configured key pair instead.
#[derive(Debug, Clone)]
pub struct StoreRecord {
    /// Store identifier.
    pub id: i64,
    /// Supplier the store belongs to.
    pub supplier_id: i64,
    /// Integrator name carried in the identity header.
    pub integrator: String,
    /// Per-record API key for Basic auth.
    pub api_key: String,
    /// Per-record API secret for Basic auth.
    pub api_secret: String,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Longitude as the platform serializes it (string).
    pub longitude: String,
    /// Latitude as the platform serializes it (string).
    pub latitude: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Contact e-mail.
    pub email: String,
    /// Current open/closed status.
    pub working_status: WorkingStatus,
    /// Average order preparation time in minutes.
    pub average_order_preparation_time_in_min: i64,
    /// Delivery type (e.g. `GO`).
    pub delivery_type: String,
    /// Record creation, epoch milliseconds.
    pub creation_date: i64,
    /// Last modification, epoch milliseconds.
    pub last_modified_date: i64,
    /// Weekly working hours.
    pub working_hours: Vec<StoreWorkingHours>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn working_status_round_trips() {
        for raw in ["OPEN", "CLOSED"] {
            let Ok(status) = raw.parse::<WorkingStatus>() else {
                panic!("status should parse: {raw}");
            };
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn working_status_rejects_other_values() {
        assert!("PAUSED".parse::<WorkingStatus>().is_err());
        assert!("open".parse::<WorkingStatus>().is_err());
    }
}
