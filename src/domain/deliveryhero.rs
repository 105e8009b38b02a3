//! Delivery Hero domain model: vendor records and availability states.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Availability state of a vendor on the Delivery Hero platform.
///
/// The wire format is the SCREAMING_SNAKE string. Values outside this set
/// are rejected at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityState {
    /// Vendor is open and accepting orders.
    Open,
    /// Vendor is closed.
    Closed,
    /// Vendor is closed until a known reopening time.
    ClosedUntil,
    /// Vendor is deactivated on the platform.
    Inactive,
    /// Platform does not know the vendor's state.
    Unknown,
    /// Vendor is closed for the rest of the day.
    ClosedToday,
}

impl AvailabilityState {
    /// The wire representation of this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::ClosedUntil => "CLOSED_UNTIL",
            Self::Inactive => "INACTIVE",
            Self::Unknown => "UNKNOWN",
            Self::ClosedToday => "CLOSED_TODAY",
        }
    }
}

impl fmt::Display for AvailabilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            "CLOSED_UNTIL" => Ok(Self::ClosedUntil),
            "INACTIVE" => Ok(Self::Inactive),
            "UNKNOWN" => Ok(Self::Unknown),
            "CLOSED_TODAY" => Ok(Self::ClosedToday),
            _ => Err(()),
        }
    }
}

/// One vendor (restaurant) as Delivery Hero sees it.
///
/// Identity is the compound key chain code + POS vendor id + platform
/// restaurant id. The record carries its own allowed closing reasons;
/// a `closedReason` in an update must come from that list, not from a
/// global one.
#[derive(Debug, Clone)]
pub struct VendorRecord {
    /// Chain the vendor belongs to.
    pub chain_code: String,
    /// POS-side vendor identifier.
    pub pos_vendor_id: String,
    /// Platform-side restaurant identifier, cross-checked on updates.
    pub platform_restaurant_id: String,
    /// Login username for the token endpoint.
    pub username: String,
    /// Login password, compared trimmed.
    pub password: String,
    /// Bearer token issued by the login endpoint.
    pub access_token: String,
    /// Platform identifier (e.g. `deliveryhero-tr`).
    pub platform_id: String,
    /// Platform type (e.g. `delivery`).
    pub platform_type: String,
    /// Platform key, cross-checked on updates.
    pub platform_key: String,
    /// Current availability state.
    pub availability_state: AvailabilityState,
    /// Whether the state may currently be mutated.
    pub changeable: bool,
    /// Current closing reason, if any.
    pub closing_reason: Option<String>,
    /// Current closing duration in minutes.
    pub closing_minutes: i64,
    /// Closed-until timestamp when the state is `CLOSED_UNTIL`.
    pub closed_until: Option<DateTime<Utc>>,
    /// Next scheduled opening, if known.
    pub next_opening_at: Option<DateTime<Utc>>,
    /// States this vendor may be switched between.
    pub availability_states: Vec<AvailabilityState>,
    /// Closing reasons this vendor accepts.
    pub closing_reasons: Vec<String>,
}

/// Validated field set applied to a vendor by an availability update.
///
/// Only fields present here are written; everything else on the record
/// stays untouched.
#[derive(Debug, Clone)]
pub struct AvailabilityUpdate {
    /// New availability state.
    pub availability_state: AvailabilityState,
    /// New closing reason, if supplied.
    pub closing_reason: Option<String>,
    /// New closing duration in minutes, if supplied.
    pub closing_minutes: Option<i64>,
    /// Derived closed-until timestamp for `CLOSED_UNTIL` updates.
    pub closed_until: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_through_wire_strings() {
        for raw in [
            "OPEN",
            "CLOSED",
            "CLOSED_UNTIL",
            "INACTIVE",
            "UNKNOWN",
            "CLOSED_TODAY",
        ] {
            let Ok(state) = raw.parse::<AvailabilityState>() else {
                panic!("state should parse: {raw}");
            };
            assert_eq!(state.as_str(), raw);
        }
    }

    #[test]
    fn unknown_state_is_rejected() {
        assert!("HALF_OPEN".parse::<AvailabilityState>().is_err());
        assert!("open".parse::<AvailabilityState>().is_err());
        assert!("".parse::<AvailabilityState>().is_err());
    }
}
