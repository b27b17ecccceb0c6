//! REST API endpoint handlers for the query service.
//!
//! Each handler runs one fixed query through the stores in
//! [`climate_db`] and shapes the rows into a response type from
//! [`climate_types`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Route listing |
//! | `GET` | `/api/v1.0/precipitation` | `date -> prcp` across all stations |
//! | `GET` | `/api/v1.0/stations` | All stations |
//! | `GET` | `/api/v1.0/tobs` | Most active station over the last year of data |
//! | `GET` | `/api/v1.0/{start}` | Temperature summary from `start` |
//! | `GET` | `/api/v1.0/{start}/{end}` | Temperature summary from `start` to `end` |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Html;
use climate_db::{MeasurementStore, StationStore, TemperatureRow};
use climate_types::{
    DatasetBounds, DateValues, PrecipitationResponse, StationActivity, StationsResponse,
    TemperatureSummary,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /`.
const INDEX_BODY: &str = "Welcome to the Hawaii Climate API<br/>\
    Available Routes:<br/>\
    /api/v1.0/precipitation<br/>\
    /api/v1.0/stations<br/>\
    /api/v1.0/tobs<br/>\
    /api/v1.0/&lt;start&gt; and /api/v1.0/&lt;start&gt;/&lt;end&gt;";

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// List the available routes.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_BODY)
}

// ---------------------------------------------------------------------------
// GET /api/v1.0/precipitation
// ---------------------------------------------------------------------------

/// Return every `(date, prcp)` pair as a single date-keyed mapping.
///
/// Rows are read in date order; when several stations report on the
/// same date the last row read wins.
pub async fn list_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrecipitationResponse>, ApiError> {
    let rows = MeasurementStore::new(state.pool.pool())
        .precipitation_by_date()
        .await?;

    let values: DateValues = rows.into_iter().map(|row| (row.date, row.prcp)).collect();

    Ok(Json(PrecipitationResponse::new(values)))
}

// ---------------------------------------------------------------------------
// GET /api/v1.0/stations
// ---------------------------------------------------------------------------

/// Return every station record.
pub async fn list_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StationsResponse>, ApiError> {
    let stations = StationStore::new(state.pool.pool()).list().await?;
    Ok(Json(stations.into_iter().collect()))
}

// ---------------------------------------------------------------------------
// GET /api/v1.0/tobs
// ---------------------------------------------------------------------------

/// Return the station with the most observations in the 365 days before
/// the latest stored date, with its precipitation readings in that span.
pub async fn most_active_station(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StationActivity>, ApiError> {
    let window = MeasurementStore::new(state.pool.pool())
        .last_year_activity()
        .await?;

    let data: DateValues = window
        .readings
        .into_iter()
        .map(|row| (row.date, row.prcp))
        .collect();

    Ok(Json(StationActivity {
        id: window.station,
        data,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/v1.0/{start} and /api/v1.0/{start}/{end}
// ---------------------------------------------------------------------------

/// Temperature summary over every date on or after `start`.
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    let row = MeasurementStore::new(state.pool.pool())
        .temperature_summary(&start, None)
        .await?;

    check_window(&state.bounds, &row, &start, None)?;

    Ok(Json(row.into()))
}

/// Temperature summary over every date from `start` to `end` inclusive.
pub async fn temperature_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    let row = MeasurementStore::new(state.pool.pool())
        .temperature_summary(&start, Some(&end))
        .await?;

    check_window(&state.bounds, &row, &start, Some(&end))?;

    Ok(Json(row.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject a temperature window that matched nothing or reaches outside
/// the dataset.
fn check_window(
    bounds: &DatasetBounds,
    row: &TemperatureRow,
    start: &str,
    end: Option<&str>,
) -> Result<(), ApiError> {
    let admitted = row.data_points != 0
        && bounds.admits_start(start)
        && end.is_none_or(|end| bounds.admits_end(end));

    if admitted {
        Ok(())
    } else {
        tracing::debug!(
            start,
            end,
            data_points = row.data_points,
            "Rejected temperature window"
        );
        Err(ApiError::InvalidDateRange(bounds.invalid_date_message()))
    }
}
