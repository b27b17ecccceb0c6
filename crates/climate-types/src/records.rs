//! Row types for the two read-only tables of the climate dataset.
//!
//! The store is populated externally and never written by this system.
//! Dates are kept as the stored `yyyy-mm-dd` strings: every filter in
//! the service compares them lexicographically, which is only sound
//! because the format is fixed-width.

use serde::{Deserialize, Serialize};

/// A single station/date observation from the `measurement` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Row identifier.
    pub id: i64,
    /// Identifier of the reporting station (`Station::station`).
    pub station: String,
    /// Observation date, `yyyy-mm-dd`.
    pub date: String,
    /// Precipitation amount, if recorded.
    pub prcp: Option<f64>,
    /// Observed temperature, if recorded.
    pub tobs: Option<f64>,
}

/// A weather-reporting site from the `station` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Row identifier.
    pub id: i64,
    /// Station identifier referenced by measurements (e.g. `USC00519397`).
    pub station: String,
    /// Display name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Elevation in meters.
    pub elevation: f64,
}
