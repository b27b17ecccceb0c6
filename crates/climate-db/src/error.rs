//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] error or names the data condition that made a query
//! unanswerable.

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `SQLite` operation failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The `measurement` table has no rows.
    #[error("measurement table is empty")]
    EmptyDataset,

    /// A stored date could not be interpreted as `yyyy-mm-dd`.
    #[error("invalid stored date: {0}")]
    InvalidDate(String),
}
