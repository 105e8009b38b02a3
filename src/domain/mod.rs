//! Domain layer: per-platform records, status enums, and column codecs.
//!
//! One module per emulated platform plus the codec helpers for the
//! loosely-typed stored columns.

pub mod codec;
pub mod deliveryhero;
pub mod getir;
pub mod trendyol;

pub use deliveryhero::{AvailabilityState, AvailabilityUpdate, VendorRecord};
pub use getir::{DaySchedule, RestaurantRecord, RestaurantStatus, WorkingWindow};
pub use trendyol::{StoreRecord, StoreWorkingHours, WorkingStatus};
