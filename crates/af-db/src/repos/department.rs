//! Department repository.

use chrono::Utc;

use af_core::entities::Department;
use af_core::enums::{AuditAction, EntityType};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_DEPARTMENT;

use crate::error::DatabaseError;
use crate::helpers::{SetClause, like_pattern, parse_datetime, to_detail};
use crate::service::AcademyService;
use crate::updates::department::DepartmentUpdate;

const SELECT_COLS: &str = "id, institute_id, code, name, created_at";

fn row_to_department(row: &libsql::Row) -> Result<Department, DatabaseError> {
    Ok(Department {
        id: row.get(0)?,
        institute_id: row.get(1)?,
        code: row.get(2)?,
        name: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl AcademyService {
    /// Create a department. Codes are unique per institute.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an empty or duplicate code.
    pub async fn create_department(
        &self,
        ctx: &SessionContext,
        code: &str,
        name: &str,
    ) -> Result<Department, DatabaseError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(DatabaseError::Validation("department code is empty".into()));
        }
        self.ensure_department_code_free(ctx, code, None).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_DEPARTMENT).await?;
        self.db()
            .execute_with(
                "INSERT INTO departments (id, institute_id, code, name, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                || {
                    libsql::params![
                        id.as_str(),
                        ctx.institute_id.as_str(),
                        code,
                        name,
                        now.to_rfc3339()
                    ]
                },
            )
            .await?;
        self.record(ctx, EntityType::Department, &id, AuditAction::Created, None)
            .await?;

        Ok(Department {
            id,
            institute_id: ctx.institute_id.clone(),
            code: code.to_string(),
            name: name.to_string(),
            created_at: now,
        })
    }

    async fn ensure_department_code_free(
        &self,
        ctx: &SessionContext,
        code: &str,
        except_id: Option<&str>,
    ) -> Result<(), DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                "SELECT id FROM departments WHERE institute_id = ?1 AND code = ?2",
                || [ctx.institute_id.as_str(), code],
            )
            .await?;
        if let Some(row) = rows.next().await? {
            let existing: String = row.get(0)?;
            if Some(existing.as_str()) != except_id {
                return Err(DatabaseError::Validation(format!(
                    "department code {code} already used by {existing}"
                )));
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the department does not exist.
    pub async fn get_department(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<Department, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!(
                    "SELECT {SELECT_COLS} FROM departments WHERE id = ?1 AND institute_id = ?2"
                ),
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_department(&row)
    }

    /// List departments by code, optionally filtered by a name/code search.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_departments(
        &self,
        ctx: &SessionContext,
        search: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Department>, DatabaseError> {
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut filter = String::new();
        if let Some(q) = search {
            params.push(like_pattern(q).into());
            filter = " AND (name LIKE ?2 OR code LIKE ?2)".to_string();
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM departments WHERE institute_id = ?1{filter}
             ORDER BY code LIMIT {limit}"
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut departments = Vec::new();
        while let Some(row) = rows.next().await? {
            departments.push(row_to_department(&row)?);
        }
        Ok(departments)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a duplicate code, or
    /// `DatabaseError::NoResult` if the department does not exist.
    pub async fn update_department(
        &self,
        ctx: &SessionContext,
        id: &str,
        update: DepartmentUpdate,
    ) -> Result<Department, DatabaseError> {
        let current = self.get_department(ctx, id).await?;
        let mut set = SetClause::new();
        if let Some(ref code) = update.code {
            self.ensure_department_code_free(ctx, code, Some(id)).await?;
            set.push("code", code.as_str());
        }
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if set.is_empty() {
            return Ok(current);
        }

        let (sql, params) = set.into_sql("departments", id, &ctx.institute_id);
        self.db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        self.record(
            ctx,
            EntityType::Department,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_department(ctx, id).await
    }

    /// Delete a department. Its programs stay, detached from it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the department does not exist.
    pub async fn delete_department(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<(), DatabaseError> {
        self.get_department(ctx, id).await?;
        self.db()
            .execute_with(
                "DELETE FROM departments WHERE id = ?1 AND institute_id = ?2",
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        self.record(ctx, EntityType::Department, id, AuditAction::Deleted, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service_with_institute;
    use crate::updates::department::DepartmentUpdateBuilder;

    #[tokio::test]
    async fn duplicate_code_rejected_per_institute() {
        let (svc, ctx) = test_service_with_institute().await;
        svc.create_department(&ctx, "CSE", "Computer Science").await.unwrap();
        let err = svc.create_department(&ctx, "CSE", "Again").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));

        let other = svc.create_institute("Elsewhere", None).await.unwrap();
        let other_ctx = SessionContext::new(other.id, None);
        assert!(svc.create_department(&other_ctx, "CSE", "CS").await.is_ok());
    }

    #[tokio::test]
    async fn search_matches_name_or_code() {
        let (svc, ctx) = test_service_with_institute().await;
        svc.create_department(&ctx, "CSE", "Computer Science").await.unwrap();
        svc.create_department(&ctx, "EEE", "Electrical").await.unwrap();

        let hits = svc.list_departments(&ctx, Some("comp"), 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "CSE");
        let hits = svc.list_departments(&ctx, Some("EE"), 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(svc.list_departments(&ctx, None, 10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let (svc, ctx) = test_service_with_institute().await;
        let dep = svc.create_department(&ctx, "ME", "Mech").await.unwrap();
        let updated = svc
            .update_department(&ctx, &dep.id, DepartmentUpdateBuilder::new().code("MME").build())
            .await
            .unwrap();
        assert_eq!(updated.code, "MME");
        assert_eq!(updated.name, "Mech");

        svc.delete_department(&ctx, &dep.id).await.unwrap();
        assert!(matches!(
            svc.get_department(&ctx, &dep.id).await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn other_institute_cannot_read() {
        let (svc, ctx) = test_service_with_institute().await;
        let dep = svc.create_department(&ctx, "CSE", "CS").await.unwrap();
        let stranger = SessionContext::new("ins-other", None);
        assert!(svc.get_department(&stranger, &dep.id).await.is_err());
    }
}
