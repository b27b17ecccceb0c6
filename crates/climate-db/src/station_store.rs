//! Queries over the `station` table.

use climate_types::Station;
use sqlx::SqlitePool;

use crate::error::DbError;

/// Operations on the `station` table.
pub struct StationStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StationStore<'a> {
    /// Create a new station store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Every station, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn list(&self) -> Result<Vec<Station>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, StationRow>(
            r"SELECT id, station, name, latitude, longitude, elevation
              FROM station",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(Station::from).collect())
    }
}

/// A row from the `station` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StationRow {
    /// Row identifier.
    pub id: i64,
    /// Station identifier.
    pub station: String,
    /// Display name.
    pub name: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Elevation.
    pub elevation: f64,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Self {
            id: row.id,
            station: row.station,
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
            elevation: row.elevation,
        }
    }
}
