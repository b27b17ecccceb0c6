//! Error types for the query API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use climate_db::DbError;

/// Errors that can occur in the query API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested date window is empty or outside the dataset.
    ///
    /// Served as a 404 whose body is exactly `{"error": <message>}`.
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),

    /// The data store failed or could not answer the query.
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidDateRange(message) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response(),
            Self::Database(e) => {
                tracing::error!(error = %e, "query failed");

                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = serde_json::json!({
                    "error": e.to_string(),
                    "status": status.as_u16(),
                });

                (status, Json(body)).into_response()
            }
        }
    }
}
