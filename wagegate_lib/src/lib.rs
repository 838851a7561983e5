//! Library layer for the wage gateway: occupation catalog, wage series
//! shaping, input validation, and configuration.
//!
//! Wraps the `datausa_api` client with a throttled catalog builder, an
//! atomically swapped catalog store, and the aggregation rules that turn raw
//! wage rows into the parallel arrays the front end plots.

pub mod catalog;
pub mod collation;
pub mod config;
pub mod error;
pub mod throttle;
pub mod validation;
pub mod wages;

pub use datausa_api;
pub use datausa_api::types;

pub use catalog::{CatalogBuilder, CatalogSnapshot, CatalogStore, OccupationRef};
pub use config::GatewayConfig;
pub use error::{ErrorKind, GatewayError};
pub use throttle::Throttle;
pub use wages::{SortMode, StateWageRecord, WageAggregator, WageSeries, WageSeriesRequest};
