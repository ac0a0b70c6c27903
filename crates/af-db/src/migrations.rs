//! Schema setup, run every time a store is opened.
//!
//! Every table and index in the bundled SQL is `IF NOT EXISTS`, so opening an
//! existing store leaves it untouched.

use crate::AcademyDb;
use crate::error::DatabaseError;

/// Initial schema: tenant tables, scheduling tables, audit trail.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl AcademyDb {
    /// Apply the bundled schema.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
