//! Cross-cutting error types for AcademyFlow.
//!
//! Domain-specific errors (`DatabaseError`, `TimetableError`, `ConfigError`)
//! are defined in their respective crates and converge in `af-cli` via `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any AcademyFlow crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
