//! Read-only HTTP query service over the Hawaii climate dataset.
//!
//! This crate provides an Axum HTTP server that maps a handful of fixed
//! routes onto fixed queries against the `SQLite` store and serializes
//! the results as JSON:
//!
//! - **`GET /`** -- route listing
//! - **`GET /api/v1.0/precipitation`** -- every `date -> prcp` pair
//! - **`GET /api/v1.0/stations`** -- station listing
//! - **`GET /api/v1.0/tobs`** -- most active station over the last year of data
//! - **`GET /api/v1.0/{start}`** and **`/api/v1.0/{start}/{end}`** --
//!   temperature aggregates over a date window
//!
//! # Architecture
//!
//! The data-store handle is passed explicitly through [`AppState`]; there
//! is no process-wide connection. Each request checks out one pooled
//! connection for the duration of its queries. Nothing is cached and the
//! store is never written, so requests are independent.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use crate::config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
