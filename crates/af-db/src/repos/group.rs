//! Student group repository.

use chrono::Utc;

use af_core::entities::Group;
use af_core::enums::{AuditAction, EntityType, ScopeKind};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_GROUP;

use crate::error::DatabaseError;
use crate::helpers::{SetClause, like_pattern, parse_datetime, to_detail};
use crate::service::AcademyService;
use crate::updates::group::GroupUpdate;

const SELECT_COLS: &str = "id, program_id, name, created_at";

fn row_to_group(row: &libsql::Row) -> Result<Group, DatabaseError> {
    Ok(Group {
        id: row.get(0)?,
        program_id: row.get(1)?,
        name: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl AcademyService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the program is unknown.
    pub async fn create_group(
        &self,
        ctx: &SessionContext,
        program_id: &str,
        name: &str,
    ) -> Result<Group, DatabaseError> {
        self.get_program(ctx, program_id)
            .await
            .map_err(|e| e.missing("program", program_id))?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_GROUP).await?;
        self.db()
            .execute_with(
                "INSERT INTO student_groups (id, institute_id, program_id, name, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                || {
                    libsql::params![
                        id.as_str(),
                        ctx.institute_id.as_str(),
                        program_id,
                        name,
                        now.to_rfc3339()
                    ]
                },
            )
            .await?;
        self.record(ctx, EntityType::Group, &id, AuditAction::Created, None)
            .await?;

        Ok(Group {
            id,
            program_id: program_id.to_string(),
            name: name.to_string(),
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the group does not exist.
    pub async fn get_group(&self, ctx: &SessionContext, id: &str) -> Result<Group, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!(
                    "SELECT {SELECT_COLS} FROM student_groups WHERE id = ?1 AND institute_id = ?2"
                ),
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_group(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_groups(
        &self,
        ctx: &SessionContext,
        program_id: Option<&str>,
        search: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Group>, DatabaseError> {
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut conditions = vec!["institute_id = ?1".to_string()];
        if let Some(program_id) = program_id {
            params.push(program_id.into());
            conditions.push(format!("program_id = ?{}", params.len()));
        }
        if let Some(q) = search {
            params.push(like_pattern(q).into());
            conditions.push(format!("name LIKE ?{}", params.len()));
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM student_groups WHERE {} ORDER BY name LIMIT {limit}",
            conditions.join(" AND ")
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut groups = Vec::new();
        while let Some(row) = rows.next().await? {
            groups.push(row_to_group(&row)?);
        }
        Ok(groups)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the group does not exist.
    pub async fn update_group(
        &self,
        ctx: &SessionContext,
        id: &str,
        update: GroupUpdate,
    ) -> Result<Group, DatabaseError> {
        let current = self.get_group(ctx, id).await?;
        let mut set = SetClause::new();
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if set.is_empty() {
            return Ok(current);
        }
        let (sql, params) = set.into_sql("student_groups", id, &ctx.institute_id);
        self.db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        self.record(
            ctx,
            EntityType::Group,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_group(ctx, id).await
    }

    /// Delete a group, its subgroups, and every event scoped to any of them.
    ///
    /// Event scopes are polymorphic and carry no foreign key, so the events
    /// are removed here before the rows they point at.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the group does not exist.
    pub async fn delete_group(&self, ctx: &SessionContext, id: &str) -> Result<(), DatabaseError> {
        self.get_group(ctx, id).await?;
        let removed = self
            .db()
            .execute_with(
                "DELETE FROM recurring_events
                 WHERE institute_id = ?1
                   AND ((scope_kind = ?2 AND scope_id = ?3)
                     OR (scope_kind = ?4 AND scope_id IN
                           (SELECT id FROM student_subgroups WHERE group_id = ?3)))",
                || {
                    libsql::params![
                        ctx.institute_id.as_str(),
                        ScopeKind::Group.as_str(),
                        id,
                        ScopeKind::Subgroup.as_str()
                    ]
                },
            )
            .await?;
        self.db()
            .execute_with(
                "DELETE FROM student_groups WHERE id = ?1 AND institute_id = ?2",
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        tracing::debug!(group = id, events = removed, "deleted group audience");
        self.record(ctx, EntityType::Group, id, AuditAction::Deleted, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_operation, test_service_with_institute};
    use crate::updates::group::GroupUpdateBuilder;

    #[tokio::test]
    async fn list_by_program_sorted_by_name() {
        let (svc, ctx) = test_service_with_institute().await;
        let op = seed_operation(&svc, &ctx).await;
        svc.create_group(&ctx, &op.program_id, "Batch 22").await.unwrap();
        svc.create_group(&ctx, &op.program_id, "Batch 21").await.unwrap();

        let groups = svc
            .list_groups(&ctx, Some(&op.program_id), None, 10)
            .await
            .unwrap();
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Batch 21", "Batch 22"]);

        let hits = svc.list_groups(&ctx, None, Some("22"), 10).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn rename() {
        let (svc, ctx) = test_service_with_institute().await;
        let op = seed_operation(&svc, &ctx).await;
        let group = svc.create_group(&ctx, &op.program_id, "B21").await.unwrap();
        let renamed = svc
            .update_group(&ctx, &group.id, GroupUpdateBuilder::new().name("Batch 21").build())
            .await
            .unwrap();
        assert_eq!(renamed.name, "Batch 21");
    }

    #[tokio::test]
    async fn group_of_other_institute_is_invisible() {
        let (svc, ctx) = test_service_with_institute().await;
        let op = seed_operation(&svc, &ctx).await;
        let group = svc.create_group(&ctx, &op.program_id, "B21").await.unwrap();

        let other = svc.create_institute("Elsewhere", None).await.unwrap();
        let other_ctx = SessionContext::new(other.id, None);
        assert!(matches!(
            svc.get_group(&other_ctx, &group.id).await,
            Err(DatabaseError::NoResult)
        ));
    }
}
