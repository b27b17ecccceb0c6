//! JSON documents returned by the query service.
//!
//! Key order is part of the contract: struct fields serialize in
//! declaration order, and [`DateValues`] keeps insertion order (the
//! workspace enables `serde_json/preserve_order`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::records::Station;

// ---------------------------------------------------------------------------
// DateValues
// ---------------------------------------------------------------------------

/// Insertion-ordered mapping from a date string to an optional value.
///
/// Inserting a date that is already present overwrites its value but
/// keeps its original position, so feeding rows sorted by date yields a
/// date-ordered object where the last row for a date wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateValues(Map<String, Value>);

impl DateValues {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Set the value for `date`, replacing any earlier value.
    pub fn insert(&mut self, date: String, value: Option<f64>) {
        self.0.insert(date, Value::from(value));
    }

    /// Look up the value for `date`.
    ///
    /// Returns `None` if the date is absent and `Some(None)` if it is
    /// present with a null value.
    pub fn get(&self, date: &str) -> Option<Option<f64>> {
        self.0.get(date).map(Value::as_f64)
    }

    /// Iterate over the dates in insertion order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of distinct dates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no dates have been inserted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Option<f64>)> for DateValues {
    fn from_iter<I: IntoIterator<Item = (String, Option<f64>)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (date, value) in iter {
            values.insert(date, value);
        }
        values
    }
}

// ---------------------------------------------------------------------------
// Precipitation
// ---------------------------------------------------------------------------

/// Body of `GET /api/v1.0/precipitation`.
///
/// The single date mapping is wrapped in a one-element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationResponse {
    /// `[ {date: prcp, ...} ]`
    #[serde(rename = "precipitation data")]
    pub precipitation_data: Vec<DateValues>,
}

impl PrecipitationResponse {
    /// Wrap a date mapping in the response envelope.
    pub fn new(values: DateValues) -> Self {
        Self {
            precipitation_data: vec![values],
        }
    }
}

// ---------------------------------------------------------------------------
// Stations
// ---------------------------------------------------------------------------

/// One entry of the station listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Station identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub long: f64,
    /// Elevation.
    pub elevation: f64,
}

impl From<Station> for StationRecord {
    fn from(station: Station) -> Self {
        Self {
            id: station.station,
            name: station.name,
            lat: station.latitude,
            long: station.longitude,
            elevation: station.elevation,
        }
    }
}

/// Body of `GET /api/v1.0/stations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationsResponse {
    /// Every station, in store order.
    pub stations: Vec<StationRecord>,
}

impl FromIterator<Station> for StationsResponse {
    fn from_iter<I: IntoIterator<Item = Station>>(iter: I) -> Self {
        Self {
            stations: iter.into_iter().map(StationRecord::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Most active station
// ---------------------------------------------------------------------------

/// Body of `GET /api/v1.0/tobs`: the most active station over the last
/// year of data and its precipitation readings in that window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationActivity {
    /// Identifier of the most active station.
    pub id: String,
    /// `{date: prcp, ...}` for that station, ascending by date.
    pub data: DateValues,
}

// ---------------------------------------------------------------------------
// Temperature summary
// ---------------------------------------------------------------------------

/// Temperature aggregate over a date window.
///
/// `TMIN`, `TMAX` and `TAVG` are `null` when no temperature was observed
/// in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    /// Number of temperature observations in the window.
    pub data_points: i64,
    /// Lowest observed temperature.
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    /// Highest observed temperature.
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
    /// Mean observed temperature.
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
}
