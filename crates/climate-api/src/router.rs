//! Axum router construction for the query API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the query service.
///
/// The router includes:
/// - `GET /` -- route listing
/// - `GET /api/v1.0/precipitation` -- precipitation by date
/// - `GET /api/v1.0/stations` -- station listing
/// - `GET /api/v1.0/tobs` -- most active station, last year of data
/// - `GET /api/v1.0/{start}` -- temperature summary from `start`
/// - `GET /api/v1.0/{start}/{end}` -- temperature summary in `[start, end]`
///
/// Static segments win over the `{start}` capture, so
/// `/api/v1.0/stations` never reaches the temperature handler.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/v1.0/precipitation", get(handlers::list_precipitation))
        .route("/api/v1.0/stations", get(handlers::list_stations))
        .route("/api/v1.0/tobs", get(handlers::most_active_station))
        .route("/api/v1.0/{start}", get(handlers::temperature_from))
        .route("/api/v1.0/{start}/{end}", get(handlers::temperature_between))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
