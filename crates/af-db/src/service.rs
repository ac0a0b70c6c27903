//! Service layer orchestrating store mutations with the audit trail.
//!
//! `AcademyService` wraps `AcademyDb`. All repo methods are implemented as
//! `impl AcademyService` blocks under `repos/`.

use std::path::Path;

use af_config::StoreConfig;

use crate::AcademyDb;
use crate::error::DatabaseError;
use crate::retry::RetryConfig;

/// Entry point for every store operation.
///
/// Every mutation method follows this protocol:
/// 1. Validate input against the caller's institute
/// 2. Execute SQL
/// 3. Append an audit entry naming the acting user
pub struct AcademyService {
    db: AcademyDb,
}

impl AcademyService {
    /// Open a service on a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = AcademyDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Open a service on a remote libSQL server.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the remote cannot be reached.
    pub async fn new_remote(
        url: &str,
        auth_token: &str,
        retry: RetryConfig,
    ) -> Result<Self, DatabaseError> {
        let db = AcademyDb::open_remote(url, auth_token, retry).await?;
        Ok(Self { db })
    }

    /// Open the store described by `config`: remote when a URL and token
    /// are set, else the local file (its parent directory is created).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store cannot be opened.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            tracing::debug!(url = %config.url, "opening remote store");
            return Self::new_remote(
                &config.url,
                &config.auth_token,
                RetryConfig::with_max_attempts(config.max_attempts),
            )
            .await;
        }

        if config.local_path != ":memory:" {
            if let Some(parent) = Path::new(&config.local_path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DatabaseError::Other(anyhow::anyhow!(
                            "cannot create {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
        }
        tracing::debug!(path = %config.local_path, "opening local store");
        Self::new_local(&config.local_path).await
    }

    /// Wrap an existing handle.
    #[must_use]
    pub const fn from_db(db: AcademyDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &AcademyDb {
        &self.db
    }
}
