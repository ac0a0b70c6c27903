//! # af-db
//!
//! libSQL store operations for AcademyFlow.
//!
//! Holds every persistent entity of an institute: departments, programs,
//! operations (terms), courses, groups and subgroups, slots, routines,
//! recurring events, vacations, users, and the audit trail. Also loads the
//! inputs of the timetable engine and runs it.
//!
//! The database is either a local file (`Builder::new_local`) or a remote
//! libSQL server (`Builder::new_remote`). Remote calls retry transient
//! infrastructure errors with exponential backoff.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod retry;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::{Builder, params::IntoParams};
use retry::{RetryConfig, is_transient_remote_error};

/// Central database handle.
///
/// Wraps a libSQL database and connection. Provides ID generation and the
/// retrying `execute_with` / `query_with` primitives every repo goes through.
pub struct AcademyDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    retry: Option<RetryConfig>,
}

impl AcademyDb {
    /// Open a local database file, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        Self::init(db, conn, None).await
    }

    /// Open a remote libSQL database (`libsql://…`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(
        url: &str,
        auth_token: &str,
        retry: RetryConfig,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;
        Self::init(db, conn, Some(retry)).await
    }

    async fn init(
        db: libsql::Database,
        conn: libsql::Connection,
        retry: Option<RetryConfig>,
    ) -> Result<Self, DatabaseError> {
        // Foreign keys are per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let academy_db = Self { db, conn, retry };
        academy_db.run_migrations().await?;
        Ok(academy_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle talks to a remote server.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.retry.is_some()
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"slt-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .query_with(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                || (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Execute a statement, retrying transient remote errors.
    ///
    /// `params` is called once per attempt since libSQL consumes parameters.
    ///
    /// # Errors
    ///
    /// Returns the last `DatabaseError` once retries are exhausted, or the
    /// first non-transient error.
    pub async fn execute_with<P, F>(&self, sql: &str, params: F) -> Result<u64, DatabaseError>
    where
        P: IntoParams,
        F: Fn() -> P,
    {
        let Some(retry) = &self.retry else {
            return Ok(self.conn.execute(sql, params()).await?);
        };
        let mut attempt = 1;
        loop {
            match self.conn.execute(sql, params()).await {
                Ok(changed) => return Ok(changed),
                Err(e) if is_transient_remote_error(&e) && attempt < retry.max_attempts => {
                    let delay = retry.delay_for(attempt);
                    tracing::warn!(attempt, ?delay, error = %e, "transient store error, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Run a query, retrying transient remote errors.
    ///
    /// # Errors
    ///
    /// Returns the last `DatabaseError` once retries are exhausted, or the
    /// first non-transient error.
    pub async fn query_with<P, F>(&self, sql: &str, params: F) -> Result<libsql::Rows, DatabaseError>
    where
        P: IntoParams,
        F: Fn() -> P,
    {
        let Some(retry) = &self.retry else {
            return Ok(self.conn.query(sql, params()).await?);
        };
        let mut attempt = 1;
        loop {
            match self.conn.query(sql, params()).await {
                Ok(rows) => return Ok(rows),
                Err(e) if is_transient_remote_error(&e) && attempt < retry.max_attempts => {
                    let delay = retry.delay_for(attempt);
                    tracing::warn!(attempt, ?delay, error = %e, "transient store error, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> AcademyDb {
        AcademyDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let tables = [
            "institutes",
            "departments",
            "programs",
            "operations",
            "courses",
            "student_groups",
            "student_subgroups",
            "slots",
            "routines",
            "recurring_events",
            "vacations",
            "users",
            "audit_trail",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            assert!(rows.next().await.unwrap().is_some(), "table '{table}' should exist");
        }
        assert!(!db.is_remote());
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("slt").await.unwrap();
        assert!(id.starts_with("slt-"), "ID should start with 'slt-': {id}");
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in af_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_serial_rejected_by_schema() {
        let db = test_db().await;
        db.execute_with("INSERT INTO institutes (id, name) VALUES ('ins-1', 'X')", || ())
            .await
            .unwrap();
        db.execute_with(
            "INSERT INTO programs (id, institute_id, name) VALUES ('prg-1', 'ins-1', 'P')",
            || (),
        )
        .await
        .unwrap();
        db.execute_with(
            "INSERT INTO operations (id, institute_id, program_id, name) VALUES ('opr-1', 'ins-1', 'prg-1', 'T')",
            || (),
        )
        .await
        .unwrap();
        let insert = "INSERT INTO slots (id, institute_id, operation_id, serial_no, name, start_time, end_time)
                      VALUES (?1, 'ins-1', 'opr-1', 1, 'P1', '09:00:00', '09:50:00')";
        db.execute_with(insert, || ["slt-1"]).await.unwrap();
        assert!(db.execute_with(insert, || ["slt-2"]).await.is_err());
    }

    #[tokio::test]
    async fn foreign_keys_enforced() {
        let db = test_db().await;
        let result = db
            .execute_with(
                "INSERT INTO departments (id, institute_id, code, name) VALUES ('dep-1', 'ins-missing', 'CSE', 'CS')",
                || (),
            )
            .await;
        assert!(result.is_err());
    }
}
