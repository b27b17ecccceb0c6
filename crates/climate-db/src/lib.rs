//! Read-only data layer for the Hawaii Climate API.
//!
//! The dataset lives in a single `SQLite` file with two tables,
//! `measurement` and `station`, populated externally. This crate opens
//! it read-only and exposes the fixed queries the HTTP routes need as
//! typed methods. Nothing here creates, migrates or writes the store.
//!
//! # Modules
//!
//! - [`sqlite`] -- `SQLite` connection pool and configuration
//! - [`measurement_store`] -- Precipitation listings, activity window, temperature aggregates
//! - [`station_store`] -- Station listing
//! - [`error`] -- Shared error types

pub mod error;
pub mod measurement_store;
pub mod sqlite;
pub mod station_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use measurement_store::{
    MeasurementStore, PrecipitationRow, StationWindow, TemperatureRow, year_before,
};
pub use sqlite::{ClimatePool, SqliteConfig};
pub use station_store::{StationRow, StationStore};
