//! Operation (term) repository.

use chrono::Utc;

use af_core::entities::Operation;
use af_core::enums::{AuditAction, EntityType, OperationStatus};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_OPERATION;

use crate::error::DatabaseError;
use crate::helpers::{SetClause, like_pattern, parse_datetime, parse_enum, to_detail};
use crate::service::AcademyService;
use crate::updates::operation::OperationUpdate;

const SELECT_COLS: &str = "id, program_id, name, status, created_at";

#[derive(Debug, Default)]
pub struct OperationFilter {
    pub program_id: Option<String>,
    pub status: Option<OperationStatus>,
    pub search: Option<String>,
}

fn row_to_operation(row: &libsql::Row) -> Result<Operation, DatabaseError> {
    Ok(Operation {
        id: row.get(0)?,
        program_id: row.get(1)?,
        name: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl AcademyService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the program is unknown.
    pub async fn create_operation(
        &self,
        ctx: &SessionContext,
        program_id: &str,
        name: &str,
        status: OperationStatus,
    ) -> Result<Operation, DatabaseError> {
        self.get_program(ctx, program_id)
            .await
            .map_err(|e| e.missing("program", program_id))?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_OPERATION).await?;
        self.db()
            .execute_with(
                "INSERT INTO operations (id, institute_id, program_id, name, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                || {
                    libsql::params![
                        id.as_str(),
                        ctx.institute_id.as_str(),
                        program_id,
                        name,
                        status.as_str(),
                        now.to_rfc3339()
                    ]
                },
            )
            .await?;
        self.record(ctx, EntityType::Operation, &id, AuditAction::Created, None)
            .await?;

        Ok(Operation {
            id,
            program_id: program_id.to_string(),
            name: name.to_string(),
            status,
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the operation does not exist.
    pub async fn get_operation(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<Operation, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM operations WHERE id = ?1 AND institute_id = ?2"),
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_operation(&row)
    }

    /// Newest terms first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_operations(
        &self,
        ctx: &SessionContext,
        filter: &OperationFilter,
        limit: u32,
    ) -> Result<Vec<Operation>, DatabaseError> {
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut conditions = vec!["institute_id = ?1".to_string()];
        if let Some(ref program_id) = filter.program_id {
            params.push(program_id.as_str().into());
            conditions.push(format!("program_id = ?{}", params.len()));
        }
        if let Some(status) = filter.status {
            params.push(status.as_str().into());
            conditions.push(format!("status = ?{}", params.len()));
        }
        if let Some(ref q) = filter.search {
            params.push(like_pattern(q).into());
            conditions.push(format!("name LIKE ?{}", params.len()));
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM operations WHERE {}
             ORDER BY created_at DESC, name LIMIT {limit}",
            conditions.join(" AND ")
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut operations = Vec::new();
        while let Some(row) = rows.next().await? {
            operations.push(row_to_operation(&row)?);
        }
        Ok(operations)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the operation does not exist.
    pub async fn update_operation(
        &self,
        ctx: &SessionContext,
        id: &str,
        update: OperationUpdate,
    ) -> Result<Operation, DatabaseError> {
        let current = self.get_operation(ctx, id).await?;
        let mut set = SetClause::new();
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if let Some(status) = update.status {
            set.push("status", status.as_str());
        }
        if set.is_empty() {
            return Ok(current);
        }

        let (sql, params) = set.into_sql("operations", id, &ctx.institute_id);
        self.db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        self.record(
            ctx,
            EntityType::Operation,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_operation(ctx, id).await
    }

    /// Delete a term with its slots, courses, and routines.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the operation does not exist.
    pub async fn delete_operation(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<(), DatabaseError> {
        self.get_operation(ctx, id).await?;
        self.db()
            .execute_with(
                "DELETE FROM operations WHERE id = ?1 AND institute_id = ?2",
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        self.record(ctx, EntityType::Operation, id, AuditAction::Deleted, None)
            .await
    }
}
