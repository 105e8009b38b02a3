//! # partner-sandbox
//!
//! Mock partner-API sandbox emulating the restaurant-integration endpoints
//! of three food-delivery platforms: Delivery Hero, Getir, and Trendyol.
//!
//! Each platform's credential scheme, status model, and exact response
//! bodies (including error messages) are reproduced so client integrations
//! can be exercised without touching the real partner APIs. Records live
//! behind an injected [`storage::PlatformStore`], either in-memory with
//! seeded fixtures or in PostgreSQL.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── DeliveryHeroService / GetirService / TrendyolService (service/)
//!     │
//!     ├── PlatformStore (storage/)
//!     │       ├── MemoryStore
//!     │       └── PostgresStore
//!     │
//!     └── Domain records + wire codecs (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;
