//! Queries over the `measurement` table.
//!
//! Every public method checks out a single pooled connection, runs all of
//! its statements on it, and hands it back when it returns. Date filters
//! compare the stored `yyyy-mm-dd` strings lexicographically.

use chrono::{Days, NaiveDate};
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::DbError;

/// Format of every stored date.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing activity window, in days.
const ACTIVITY_WINDOW_DAYS: u64 = 365;

/// Operations on the `measurement` table.
pub struct MeasurementStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MeasurementStore<'a> {
    /// Create a new measurement store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All `(date, prcp)` pairs across every station, ascending by date.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn precipitation_by_date(&self) -> Result<Vec<PrecipitationRow>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, PrecipitationRow>(
            r"SELECT date, prcp
              FROM measurement
              ORDER BY date",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }

    /// The most recent observation date, or `None` if the table is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn latest_date(&self) -> Result<Option<String>, DbError> {
        let mut conn = self.pool.acquire().await?;
        latest_date(&mut conn).await
    }

    /// The station with the most rows dated on or after `since`.
    ///
    /// Ties go to whichever station the store returns first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn most_active_station(&self, since: &str) -> Result<Option<String>, DbError> {
        let mut conn = self.pool.acquire().await?;
        most_active_station(&mut conn, since).await
    }

    /// `(date, prcp)` pairs for one station dated on or after `since`,
    /// ascending by date.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn station_precipitation(
        &self,
        station: &str,
        since: &str,
    ) -> Result<Vec<PrecipitationRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        station_precipitation(&mut conn, station, since).await
    }

    /// The most active station over the last year of data and its
    /// precipitation readings in that year.
    ///
    /// The window starts exactly 365 days before the latest stored date.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::EmptyDataset`] if there are no measurements,
    /// [`DbError::InvalidDate`] if the latest date is not `yyyy-mm-dd`,
    /// or [`DbError::Sqlite`] if a query fails.
    pub async fn last_year_activity(&self) -> Result<StationWindow, DbError> {
        let mut conn = self.pool.acquire().await?;

        let latest = latest_date(&mut conn)
            .await?
            .ok_or(DbError::EmptyDataset)?;
        let since = year_before(&latest)?;

        let station = most_active_station(&mut conn, &since)
            .await?
            .ok_or(DbError::EmptyDataset)?;

        let readings = station_precipitation(&mut conn, &station, &since).await?;

        tracing::debug!(
            station = %station,
            since = %since,
            latest = %latest,
            readings = readings.len(),
            "Resolved most active station"
        );

        Ok(StationWindow {
            station,
            since,
            readings,
        })
    }

    /// Count, minimum, maximum and mean of `tobs` for rows dated on or
    /// after `start`, and on or before `end` when given.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn temperature_summary(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureRow, DbError> {
        let mut conn = self.pool.acquire().await?;

        let row = match end {
            Some(end) => {
                sqlx::query_as::<_, TemperatureRow>(
                    r"SELECT COUNT(tobs) AS data_points,
                             MIN(tobs) AS tmin,
                             MAX(tobs) AS tmax,
                             AVG(tobs) AS tavg
                      FROM measurement
                      WHERE date >= ?1 AND date <= ?2",
                )
                .bind(start)
                .bind(end)
                .fetch_one(&mut *conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, TemperatureRow>(
                    r"SELECT COUNT(tobs) AS data_points,
                             MIN(tobs) AS tmin,
                             MAX(tobs) AS tmax,
                             AVG(tobs) AS tavg
                      FROM measurement
                      WHERE date >= ?1",
                )
                .bind(start)
                .fetch_one(&mut *conn)
                .await?
            }
        };

        Ok(row)
    }
}

// ---------------------------------------------------------------------------
// Connection-scoped statements
// ---------------------------------------------------------------------------

async fn latest_date(conn: &mut SqliteConnection) -> Result<Option<String>, DbError> {
    let row: (Option<String>,) = sqlx::query_as(r"SELECT MAX(date) FROM measurement")
        .fetch_one(&mut *conn)
        .await?;
    Ok(row.0)
}

async fn most_active_station(
    conn: &mut SqliteConnection,
    since: &str,
) -> Result<Option<String>, DbError> {
    let row: Option<(String,)> = sqlx::query_as(
        r"SELECT station
          FROM measurement
          WHERE date >= ?1
          GROUP BY station
          ORDER BY COUNT(id) DESC
          LIMIT 1",
    )
    .bind(since)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row.map(|(station,)| station))
}

async fn station_precipitation(
    conn: &mut SqliteConnection,
    station: &str,
    since: &str,
) -> Result<Vec<PrecipitationRow>, DbError> {
    let rows = sqlx::query_as::<_, PrecipitationRow>(
        r"SELECT date, prcp
          FROM measurement
          WHERE station = ?1 AND date >= ?2
          ORDER BY date",
    )
    .bind(station)
    .bind(since)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// The date exactly 365 days before `date`, both as `yyyy-mm-dd`.
///
/// # Errors
///
/// Returns [`DbError::InvalidDate`] if `date` does not parse or the
/// result falls outside the representable calendar.
pub fn year_before(date: &str) -> Result<String, DbError> {
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| DbError::InvalidDate(format!("{date}: {e}")))?;
    let cutoff = parsed
        .checked_sub_days(Days::new(ACTIVITY_WINDOW_DAYS))
        .ok_or_else(|| DbError::InvalidDate(format!("{date}: out of range")))?;
    Ok(cutoff.format(DATE_FORMAT).to_string())
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A `(date, prcp)` projection of the `measurement` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PrecipitationRow {
    /// Observation date.
    pub date: String,
    /// Precipitation amount, if recorded.
    pub prcp: Option<f64>,
}

/// The most active station over a trailing window and its readings.
#[derive(Debug, Clone, PartialEq)]
pub struct StationWindow {
    /// Identifier of the station with the most rows in the window.
    pub station: String,
    /// First date of the window (inclusive).
    pub since: String,
    /// The station's `(date, prcp)` rows in the window, ascending by date.
    pub readings: Vec<PrecipitationRow>,
}

/// Aggregate of `tobs` over a date window.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TemperatureRow {
    /// Number of non-null temperature observations.
    pub data_points: i64,
    /// Minimum temperature, `None` when there were no observations.
    pub tmin: Option<f64>,
    /// Maximum temperature.
    pub tmax: Option<f64>,
    /// Mean temperature.
    pub tavg: Option<f64>,
}

impl From<TemperatureRow> for climate_types::TemperatureSummary {
    fn from(row: TemperatureRow) -> Self {
        Self {
            data_points: row.data_points,
            tmin: row.tmin,
            tmax: row.tmax,
            tavg: row.tavg,
        }
    }
}
