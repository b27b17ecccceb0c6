//! Shared type definitions for the Hawaii Climate API.
//!
//! The dataset is two static tables, `measurement` and `station`. This
//! crate declares them as plain records and defines the JSON documents
//! the query service returns, so the data layer and the HTTP layer agree
//! on shapes without either depending on the other.
//!
//! # Modules
//!
//! - [`records`] -- `Measurement` and `Station` rows
//! - [`responses`] -- JSON response documents, in the exact key order served
//! - [`bounds`] -- Known first/last dates of the dataset, used for validation

pub mod bounds;
pub mod records;
pub mod responses;

// Re-export all public types at crate root for convenience.
pub use bounds::DatasetBounds;
pub use records::{Measurement, Station};
pub use responses::{
    DateValues, PrecipitationResponse, StationActivity, StationRecord, StationsResponse,
    TemperatureSummary,
};
