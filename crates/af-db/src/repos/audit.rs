//! Audit trail repository.
//!
//! Append-only entries recording every mutation with the acting user.

use chrono::Utc;

use af_core::entities::AuditEntry;
use af_core::enums::{AuditAction, EntityType};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_AUDIT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json};
use crate::service::AcademyService;

const SELECT_COLS: &str =
    "id, institute_id, actor_id, entity_type, entity_id, action, detail, created_at";

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub actor_id: Option<String>,
    pub limit: Option<u32>,
}

fn row_to_audit(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        id: row.get(0)?,
        institute_id: row.get(1)?,
        actor_id: get_opt_string(row, 2)?,
        entity_type: parse_enum(&row.get::<String>(3)?)?,
        entity_id: row.get(4)?,
        action: parse_enum(&row.get::<String>(5)?)?,
        detail: parse_optional_json(get_opt_string(row, 6)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl AcademyService {
    /// Append an audit entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_audit(&self, entry: &AuditEntry) -> Result<(), DatabaseError> {
        let detail = entry.detail.as_ref().map(ToString::to_string);
        self.db()
            .execute_with(
                "INSERT INTO audit_trail (id, institute_id, actor_id, entity_type, entity_id, action, detail, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                || {
                    libsql::params![
                        entry.id.as_str(),
                        entry.institute_id.as_str(),
                        entry.actor_id.as_deref(),
                        entry.entity_type.as_str(),
                        entry.entity_id.as_str(),
                        entry.action.as_str(),
                        detail.as_deref(),
                        entry.created_at.to_rfc3339()
                    ]
                },
            )
            .await?;
        Ok(())
    }

    /// Record a mutation by the session's user. Called by every mutating
    /// repo method after its SQL succeeds.
    pub(crate) async fn record(
        &self,
        ctx: &SessionContext,
        entity_type: EntityType,
        entity_id: &str,
        action: AuditAction,
        detail: Option<serde_json::Value>,
    ) -> Result<(), DatabaseError> {
        let entry = AuditEntry {
            id: self.db().generate_id(PREFIX_AUDIT).await?,
            institute_id: ctx.institute_id.clone(),
            actor_id: ctx.user_id.clone(),
            entity_type,
            entity_id: entity_id.to_string(),
            action,
            detail,
            created_at: Utc::now(),
        };
        self.append_audit(&entry).await?;
        tracing::debug!(entity = %entity_type, id = entity_id, action = %action, "recorded mutation");
        Ok(())
    }

    /// Query the institute's audit entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(
        &self,
        ctx: &SessionContext,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut conditions = vec!["institute_id = ?1".to_string()];

        if let Some(et) = filter.entity_type {
            params.push(et.as_str().into());
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(ref eid) = filter.entity_id {
            params.push(eid.as_str().into());
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(action.as_str().into());
            conditions.push(format!("action = ?{}", params.len()));
        }
        if let Some(ref actor) = filter.actor_id {
            params.push(actor.as_str().into());
            conditions.push(format!("actor_id = ?{}", params.len()));
        }

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM audit_trail WHERE {}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}",
            conditions.join(" AND ")
        );

        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_audit(&row)?);
        }
        Ok(entries)
    }
}
