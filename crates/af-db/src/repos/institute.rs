//! Institute repository.
//!
//! Institutes are the tenants every other row hangs off. Creating one is the
//! only mutation that runs before a session context exists.

use chrono::Utc;

use af_core::entities::Institute;
use af_core::enums::{AuditAction, EntityType};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_INSTITUTE;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::AcademyService;

const SELECT_COLS: &str = "id, name, created_at";

fn row_to_institute(row: &libsql::Row) -> Result<Institute, DatabaseError> {
    Ok(Institute {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
    })
}

impl AcademyService {
    /// Create an institute. The audit entry is filed under the new institute.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an empty name.
    pub async fn create_institute(
        &self,
        name: &str,
        actor_id: Option<&str>,
    ) -> Result<Institute, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::Validation("institute name is empty".into()));
        }
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_INSTITUTE).await?;

        self.db()
            .execute_with(
                "INSERT INTO institutes (id, name, created_at) VALUES (?1, ?2, ?3)",
                || libsql::params![id.as_str(), name, now.to_rfc3339()],
            )
            .await?;

        let ctx = SessionContext::new(id.clone(), actor_id.map(String::from));
        self.record(&ctx, EntityType::Institute, &id, AuditAction::Created, None)
            .await?;

        Ok(Institute {
            id,
            name: name.to_string(),
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the institute does not exist.
    pub async fn get_institute(&self, id: &str) -> Result<Institute, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM institutes WHERE id = ?1"),
                || [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_institute(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_institutes(&self, limit: u32) -> Result<Vec<Institute>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM institutes ORDER BY name LIMIT {limit}"),
                || (),
            )
            .await?;
        let mut institutes = Vec::new();
        while let Some(row) = rows.next().await? {
            institutes.push(row_to_institute(&row)?);
        }
        Ok(institutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;

    #[tokio::test]
    async fn create_get_list() {
        let svc = test_service().await;
        let a = svc.create_institute("  Zeta College ", None).await.unwrap();
        let b = svc.create_institute("Alpha School", Some("usr-1")).await.unwrap();
        assert_eq!(a.name, "Zeta College");
        assert_eq!(svc.get_institute(&a.id).await.unwrap(), a);

        let names: Vec<String> = svc
            .list_institutes(10)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Alpha School", "Zeta College"]);
        assert!(b.id.starts_with("ins-"));
    }

    #[tokio::test]
    async fn empty_name_rejected() {
        let svc = test_service().await;
        assert!(matches!(
            svc.create_institute("   ", None).await,
            Err(DatabaseError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn missing_institute_is_no_result() {
        let svc = test_service().await;
        assert!(matches!(
            svc.get_institute("ins-missing").await,
            Err(DatabaseError::NoResult)
        ));
    }
}
