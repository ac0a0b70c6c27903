//! Student subgroup repository.

use chrono::Utc;

use af_core::entities::Subgroup;
use af_core::enums::{AuditAction, EntityType, ScopeKind};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_SUBGROUP;

use crate::error::DatabaseError;
use crate::helpers::{SetClause, like_pattern, parse_datetime, to_detail};
use crate::service::AcademyService;
use crate::updates::subgroup::SubgroupUpdate;

pub(crate) const SELECT_COLS: &str = "id, group_id, name, created_at";

pub(crate) fn row_to_subgroup(row: &libsql::Row) -> Result<Subgroup, DatabaseError> {
    Ok(Subgroup {
        id: row.get(0)?,
        group_id: row.get(1)?,
        name: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl AcademyService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the parent group is unknown.
    pub async fn create_subgroup(
        &self,
        ctx: &SessionContext,
        group_id: &str,
        name: &str,
    ) -> Result<Subgroup, DatabaseError> {
        self.get_group(ctx, group_id)
            .await
            .map_err(|e| e.missing("group", group_id))?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_SUBGROUP).await?;
        self.db()
            .execute_with(
                "INSERT INTO student_subgroups (id, institute_id, group_id, name, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                || {
                    libsql::params![
                        id.as_str(),
                        ctx.institute_id.as_str(),
                        group_id,
                        name,
                        now.to_rfc3339()
                    ]
                },
            )
            .await?;
        self.record(ctx, EntityType::Subgroup, &id, AuditAction::Created, None)
            .await?;

        Ok(Subgroup {
            id,
            group_id: group_id.to_string(),
            name: name.to_string(),
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the subgroup does not exist.
    pub async fn get_subgroup(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<Subgroup, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!(
                    "SELECT {SELECT_COLS} FROM student_subgroups WHERE id = ?1 AND institute_id = ?2"
                ),
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_subgroup(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_subgroups(
        &self,
        ctx: &SessionContext,
        group_id: Option<&str>,
        search: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Subgroup>, DatabaseError> {
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut conditions = vec!["institute_id = ?1".to_string()];
        if let Some(group_id) = group_id {
            params.push(group_id.into());
            conditions.push(format!("group_id = ?{}", params.len()));
        }
        if let Some(q) = search {
            params.push(like_pattern(q).into());
            conditions.push(format!("name LIKE ?{}", params.len()));
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM student_subgroups WHERE {} ORDER BY name LIMIT {limit}",
            conditions.join(" AND ")
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut subgroups = Vec::new();
        while let Some(row) = rows.next().await? {
            subgroups.push(row_to_subgroup(&row)?);
        }
        Ok(subgroups)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the subgroup does not exist.
    pub async fn update_subgroup(
        &self,
        ctx: &SessionContext,
        id: &str,
        update: SubgroupUpdate,
    ) -> Result<Subgroup, DatabaseError> {
        let current = self.get_subgroup(ctx, id).await?;
        let mut set = SetClause::new();
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if set.is_empty() {
            return Ok(current);
        }
        let (sql, params) = set.into_sql("student_subgroups", id, &ctx.institute_id);
        self.db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        self.record(
            ctx,
            EntityType::Subgroup,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_subgroup(ctx, id).await
    }

    /// Delete a subgroup and the events scoped to it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the subgroup does not exist.
    pub async fn delete_subgroup(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<(), DatabaseError> {
        self.get_subgroup(ctx, id).await?;
        self.db()
            .execute_with(
                "DELETE FROM recurring_events
                 WHERE institute_id = ?1 AND scope_kind = ?2 AND scope_id = ?3",
                || {
                    libsql::params![
                        ctx.institute_id.as_str(),
                        ScopeKind::Subgroup.as_str(),
                        id
                    ]
                },
            )
            .await?;
        self.db()
            .execute_with(
                "DELETE FROM student_subgroups WHERE id = ?1 AND institute_id = ?2",
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        self.record(ctx, EntityType::Subgroup, id, AuditAction::Deleted, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_timetable, test_service_with_institute};

    #[tokio::test]
    async fn unknown_parent_rejected() {
        let (svc, ctx) = test_service_with_institute().await;
        let err = svc.create_subgroup(&ctx, "grp-none", "Lab").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn deleting_group_removes_subgroups() {
        let (svc, ctx) = test_service_with_institute().await;
        let fx = seed_timetable(&svc, &ctx).await;
        assert_eq!(
            svc.list_subgroups(&ctx, Some(&fx.group.id), None, 10)
                .await
                .unwrap()
                .len(),
            2
        );
        svc.delete_group(&ctx, &fx.group.id).await.unwrap();
        assert!(
            svc.list_subgroups(&ctx, Some(&fx.group.id), None, 10)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn search_by_name() {
        let (svc, ctx) = test_service_with_institute().await;
        let fx = seed_timetable(&svc, &ctx).await;
        let hits = svc.list_subgroups(&ctx, None, Some("lab b"), 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, fx.subgroups[1].id);
    }
}
