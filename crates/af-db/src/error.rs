//! Database error types for af-db.

use af_timetable::TimetableError;
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Input rejected before touching the database.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Selection or cell rejected by the timetable engine.
    #[error(transparent)]
    Timetable(#[from] TimetableError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Map [`DatabaseError::NoResult`] to a validation error naming the
    /// missing row. Used when a referenced parent must exist.
    #[must_use]
    pub fn missing(self, what: &str, id: &str) -> Self {
        match self {
            Self::NoResult => Self::Validation(format!("{what} {id} not found")),
            other => other,
        }
    }
}
