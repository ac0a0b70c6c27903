//! Routine repository.
//!
//! A routine is a named weekly timetable belonging to one term.

use chrono::Utc;

use af_core::entities::Routine;
use af_core::enums::{AuditAction, EntityType};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_ROUTINE;
use af_core::responses::RoutineSummary;

use crate::error::DatabaseError;
use crate::helpers::{SetClause, parse_datetime, to_detail};
use crate::service::AcademyService;
use crate::updates::routine::RoutineUpdate;

const SELECT_COLS: &str = "id, operation_id, name, created_at";

#[derive(Debug, Default)]
pub struct RoutineFilter {
    pub operation_id: Option<String>,
    pub program_id: Option<String>,
}

fn row_to_routine(row: &libsql::Row) -> Result<Routine, DatabaseError> {
    Ok(Routine {
        id: row.get(0)?,
        operation_id: row.get(1)?,
        name: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl AcademyService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the operation is unknown.
    pub async fn create_routine(
        &self,
        ctx: &SessionContext,
        operation_id: &str,
        name: &str,
    ) -> Result<Routine, DatabaseError> {
        self.get_operation(ctx, operation_id)
            .await
            .map_err(|e| e.missing("operation", operation_id))?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ROUTINE).await?;
        self.db()
            .execute_with(
                "INSERT INTO routines (id, institute_id, operation_id, name, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                || {
                    libsql::params![
                        id.as_str(),
                        ctx.institute_id.as_str(),
                        operation_id,
                        name,
                        now.to_rfc3339()
                    ]
                },
            )
            .await?;
        self.record(ctx, EntityType::Routine, &id, AuditAction::Created, None)
            .await?;

        Ok(Routine {
            id,
            operation_id: operation_id.to_string(),
            name: name.to_string(),
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the routine does not exist.
    pub async fn get_routine(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<Routine, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM routines WHERE id = ?1 AND institute_id = ?2"),
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_routine(&row)
    }

    /// Routines with their term name, filtered by term or by program.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_routines(
        &self,
        ctx: &SessionContext,
        filter: &RoutineFilter,
        limit: u32,
    ) -> Result<Vec<RoutineSummary>, DatabaseError> {
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut conditions = vec!["r.institute_id = ?1".to_string()];
        if let Some(ref op) = filter.operation_id {
            params.push(op.as_str().into());
            conditions.push(format!("r.operation_id = ?{}", params.len()));
        }
        if let Some(ref program) = filter.program_id {
            params.push(program.as_str().into());
            conditions.push(format!("o.program_id = ?{}", params.len()));
        }
        let sql = format!(
            "SELECT r.id, r.operation_id, r.name, r.created_at, o.name, o.program_id
             FROM routines r JOIN operations o ON o.id = r.operation_id
             WHERE {} ORDER BY o.name, r.name LIMIT {limit}",
            conditions.join(" AND ")
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut summaries = Vec::new();
        while let Some(row) = rows.next().await? {
            summaries.push(RoutineSummary {
                routine: row_to_routine(&row)?,
                operation_name: row.get(4)?,
                program_id: row.get(5)?,
            });
        }
        Ok(summaries)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the routine does not exist.
    pub async fn update_routine(
        &self,
        ctx: &SessionContext,
        id: &str,
        update: RoutineUpdate,
    ) -> Result<Routine, DatabaseError> {
        let current = self.get_routine(ctx, id).await?;
        let mut set = SetClause::new();
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if set.is_empty() {
            return Ok(current);
        }
        let (sql, params) = set.into_sql("routines", id, &ctx.institute_id);
        self.db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        self.record(
            ctx,
            EntityType::Routine,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_routine(ctx, id).await
    }

    /// Delete a routine and all of its events.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the routine does not exist.
    pub async fn delete_routine(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<(), DatabaseError> {
        self.get_routine(ctx, id).await?;
        self.db()
            .execute_with(
                "DELETE FROM routines WHERE id = ?1 AND institute_id = ?2",
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        self.record(ctx, EntityType::Routine, id, AuditAction::Deleted, None)
            .await
    }
}
