//! Program repository.

use chrono::Utc;

use af_core::entities::Program;
use af_core::enums::{AuditAction, EntityType};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_PROGRAM;

use crate::error::DatabaseError;
use crate::helpers::{SetClause, get_bool, get_opt_string, like_pattern, parse_datetime, to_detail};
use crate::service::AcademyService;
use crate::updates::program::ProgramUpdate;

const SELECT_COLS: &str = "id, institute_id, department_id, name, is_active, created_at";

/// Filter criteria for program listings.
#[derive(Debug, Default)]
pub struct ProgramFilter {
    pub search: Option<String>,
    pub department_id: Option<String>,
    pub active_only: bool,
}

fn row_to_program(row: &libsql::Row) -> Result<Program, DatabaseError> {
    Ok(Program {
        id: row.get(0)?,
        institute_id: row.get(1)?,
        department_id: get_opt_string(row, 2)?,
        name: row.get(3)?,
        is_active: get_bool(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl AcademyService {
    /// Create an active program, optionally under a department.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the department is unknown.
    pub async fn create_program(
        &self,
        ctx: &SessionContext,
        name: &str,
        department_id: Option<&str>,
    ) -> Result<Program, DatabaseError> {
        if let Some(dep) = department_id {
            self.get_department(ctx, dep)
                .await
                .map_err(|e| e.missing("department", dep))?;
        }
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PROGRAM).await?;
        self.db()
            .execute_with(
                "INSERT INTO programs (id, institute_id, department_id, name, is_active, created_at)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5)",
                || {
                    libsql::params![
                        id.as_str(),
                        ctx.institute_id.as_str(),
                        department_id,
                        name,
                        now.to_rfc3339()
                    ]
                },
            )
            .await?;
        self.record(ctx, EntityType::Program, &id, AuditAction::Created, None)
            .await?;

        Ok(Program {
            id,
            institute_id: ctx.institute_id.clone(),
            department_id: department_id.map(String::from),
            name: name.to_string(),
            is_active: true,
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the program does not exist.
    pub async fn get_program(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<Program, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM programs WHERE id = ?1 AND institute_id = ?2"),
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_program(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_programs(
        &self,
        ctx: &SessionContext,
        filter: &ProgramFilter,
        limit: u32,
    ) -> Result<Vec<Program>, DatabaseError> {
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut conditions = vec!["institute_id = ?1".to_string()];
        if let Some(ref q) = filter.search {
            params.push(like_pattern(q).into());
            conditions.push(format!("name LIKE ?{}", params.len()));
        }
        if let Some(ref dep) = filter.department_id {
            params.push(dep.as_str().into());
            conditions.push(format!("department_id = ?{}", params.len()));
        }
        if filter.active_only {
            conditions.push("is_active = 1".to_string());
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM programs WHERE {} ORDER BY name LIMIT {limit}",
            conditions.join(" AND ")
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut programs = Vec::new();
        while let Some(row) = rows.next().await? {
            programs.push(row_to_program(&row)?);
        }
        Ok(programs)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the new department is unknown.
    pub async fn update_program(
        &self,
        ctx: &SessionContext,
        id: &str,
        update: ProgramUpdate,
    ) -> Result<Program, DatabaseError> {
        let current = self.get_program(ctx, id).await?;
        let mut set = SetClause::new();
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if let Some(ref department_id) = update.department_id {
            if let Some(dep) = department_id {
                self.get_department(ctx, dep)
                    .await
                    .map_err(|e| e.missing("department", dep))?;
            }
            set.push_opt("department_id", department_id.clone());
        }
        if let Some(is_active) = update.is_active {
            set.push("is_active", i64::from(is_active));
        }
        if set.is_empty() {
            return Ok(current);
        }

        let (sql, params) = set.into_sql("programs", id, &ctx.institute_id);
        self.db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        self.record(
            ctx,
            EntityType::Program,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_program(ctx, id).await
    }

    /// Delete a program together with its terms, groups, and everything under them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the program does not exist.
    pub async fn delete_program(&self, ctx: &SessionContext, id: &str) -> Result<(), DatabaseError> {
        self.get_program(ctx, id).await?;
        self.db()
            .execute_with(
                "DELETE FROM programs WHERE id = ?1 AND institute_id = ?2",
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        self.record(ctx, EntityType::Program, id, AuditAction::Deleted, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service_with_institute;
    use crate::updates::program::ProgramUpdateBuilder;

    #[tokio::test]
    async fn active_only_and_search_filters() {
        let (svc, ctx) = test_service_with_institute().await;
        let dep = svc.create_department(&ctx, "SCI", "Science").await.unwrap();
        let phys = svc.create_program(&ctx, "BSc Physics", Some(&dep.id)).await.unwrap();
        let chem = svc.create_program(&ctx, "BSc Chemistry", None).await.unwrap();
        svc.update_program(&ctx, &chem.id, ProgramUpdateBuilder::new().is_active(false).build())
            .await
            .unwrap();

        let active = svc
            .list_programs(
                &ctx,
                &ProgramFilter {
                    active_only: true,
                    ..Default::default()
                },
                10,
            )
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, phys.id);

        let search = svc
            .list_programs(
                &ctx,
                &ProgramFilter {
                    search: Some("chem".into()),
                    ..Default::default()
                },
                10,
            )
            .await
            .unwrap();
        assert_eq!(search.len(), 1);
        assert!(!search[0].is_active);

        let by_dep = svc
            .list_programs(
                &ctx,
                &ProgramFilter {
                    department_id: Some(dep.id.clone()),
                    ..Default::default()
                },
                10,
            )
            .await
            .unwrap();
        assert_eq!(by_dep.len(), 1);
    }

    #[tokio::test]
    async fn unknown_department_rejected() {
        let (svc, ctx) = test_service_with_institute().await;
        let err = svc
            .create_program(&ctx, "BA", Some("dep-missing"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("dep-missing"));
    }

    #[tokio::test]
    async fn detaching_department() {
        let (svc, ctx) = test_service_with_institute().await;
        let dep = svc.create_department(&ctx, "ART", "Arts").await.unwrap();
        let prog = svc.create_program(&ctx, "BA", Some(&dep.id)).await.unwrap();
        let updated = svc
            .update_program(&ctx, &prog.id, ProgramUpdateBuilder::new().department_id(None).build())
            .await
            .unwrap();
        assert_eq!(updated.department_id, None);
    }
}
