//! Shared application state for the query API.

use climate_db::ClimatePool;
use climate_types::DatasetBounds;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Pooled handle to the climate dataset.
    pub pool: ClimatePool,
    /// Known first/last dates, used to validate temperature windows.
    pub bounds: DatasetBounds,
}

impl AppState {
    /// Create the application state from a connected pool and the
    /// dataset bounds.
    pub const fn new(pool: ClimatePool, bounds: DatasetBounds) -> Self {
        Self { pool, bounds }
    }
}
