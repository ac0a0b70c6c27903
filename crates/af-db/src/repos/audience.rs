//! Audience resolution: subgroups of a group, display names, and the name
//! snapshot handed to the timetable engine.

use std::collections::BTreeSet;

use af_core::entities::{AudienceScope, RecurringEvent, Subgroup};
use af_core::enums::ScopeKind;
use af_core::identity::SessionContext;
use af_timetable::{NameDirectory, Selection};

use crate::error::DatabaseError;
use crate::repos::subgroup::{SELECT_COLS as SUBGROUP_COLS, row_to_subgroup};
use crate::service::AcademyService;

impl AcademyService {
    /// All subgroups whose parent is `group_id`, by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_subgroups_of(
        &self,
        ctx: &SessionContext,
        group_id: &str,
    ) -> Result<Vec<Subgroup>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!(
                    "SELECT {SUBGROUP_COLS} FROM student_subgroups
                     WHERE group_id = ?1 AND institute_id = ?2 ORDER BY name"
                ),
                || [group_id, ctx.institute_id.as_str()],
            )
            .await?;
        let mut subgroups = Vec::new();
        while let Some(row) = rows.next().await? {
            subgroups.push(row_to_subgroup(&row)?);
        }
        Ok(subgroups)
    }

    /// Name of the group or subgroup behind `scope`. `None` for unknown
    /// kinds and missing rows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the lookup fails for a reason other than
    /// a missing row.
    pub async fn display_name_of(
        &self,
        ctx: &SessionContext,
        scope: &AudienceScope,
    ) -> Result<Option<String>, DatabaseError> {
        let lookup = match scope.kind {
            ScopeKind::Group => self.get_group(ctx, &scope.id).await.map(|g| g.name),
            ScopeKind::Subgroup => self.get_subgroup(ctx, &scope.id).await.map(|s| s.name),
            ScopeKind::Unknown => return Ok(None),
        };
        match lookup {
            Ok(name) => Ok(Some(name)),
            Err(DatabaseError::NoResult) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Snapshot of every group, subgroup, and course name referenced by
    /// `events`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn load_name_directory(
        &self,
        ctx: &SessionContext,
        events: &[RecurringEvent],
    ) -> Result<NameDirectory, DatabaseError> {
        let mut group_ids = BTreeSet::new();
        let mut subgroup_ids = BTreeSet::new();
        let mut course_ids = BTreeSet::new();
        for event in events {
            match event.scope.kind {
                ScopeKind::Group => {
                    group_ids.insert(event.scope.id.as_str());
                }
                ScopeKind::Subgroup => {
                    subgroup_ids.insert(event.scope.id.as_str());
                }
                ScopeKind::Unknown => {}
            }
            if let Some(ref course_id) = event.course_id {
                course_ids.insert(course_id.as_str());
            }
        }

        let mut names = NameDirectory::new();
        for (id, name) in self.names_by_id(ctx, "student_groups", &group_ids).await? {
            names.insert_group(id, name);
        }
        for (id, name) in self
            .names_by_id(ctx, "student_subgroups", &subgroup_ids)
            .await?
        {
            names.insert_subgroup(id, name);
        }
        for (id, name) in self.names_by_id(ctx, "courses", &course_ids).await? {
            names.insert_course(id, name);
        }
        Ok(names)
    }

    async fn names_by_id(
        &self,
        ctx: &SessionContext,
        table: &str,
        ids: &BTreeSet<&str>,
    ) -> Result<Vec<(String, String)>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut placeholders = Vec::with_capacity(ids.len());
        for id in ids {
            params.push((*id).into());
            placeholders.push(format!("?{}", params.len()));
        }
        let sql = format!(
            "SELECT id, name FROM {table} WHERE institute_id = ?1 AND id IN ({})",
            placeholders.join(", ")
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut names = Vec::with_capacity(ids.len());
        while let Some(row) = rows.next().await? {
            names.push((row.get(0)?, row.get(1)?));
        }
        Ok(names)
    }

    /// Validate a view selection against stored groups.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an unknown group, and
    /// `DatabaseError::Timetable` when the subgroup is given without a group
    /// or belongs to another group.
    pub async fn resolve_selection(
        &self,
        ctx: &SessionContext,
        group_id: Option<&str>,
        subgroup_id: Option<&str>,
    ) -> Result<Selection, DatabaseError> {
        let children: Vec<String> = match group_id {
            Some(group_id) => {
                self.get_group(ctx, group_id)
                    .await
                    .map_err(|e| e.missing("group", group_id))?;
                self.list_subgroups_of(ctx, group_id)
                    .await?
                    .into_iter()
                    .map(|s| s.id)
                    .collect()
            }
            None => Vec::new(),
        };
        Ok(Selection::from_parts(
            group_id.map(String::from),
            subgroup_id.map(String::from),
            children,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::repos::recurring_event::NewEvent;
    use crate::test_support::{seed_timetable, test_service_with_institute};
    use af_core::enums::DayOfWeek;
    use af_timetable::{NameLookup, TimetableError};

    #[tokio::test]
    async fn subgroups_of_group() {
        let (svc, ctx) = test_service_with_institute().await;
        let fx = seed_timetable(&svc, &ctx).await;
        let names: Vec<String> = svc
            .list_subgroups_of(&ctx, &fx.group.id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Lab A".to_string(), "Lab B".to_string()]);
    }

    #[tokio::test]
    async fn display_names() {
        let (svc, ctx) = test_service_with_institute().await;
        let fx = seed_timetable(&svc, &ctx).await;
        assert_eq!(
            svc.display_name_of(&ctx, &AudienceScope::group(&fx.group.id))
                .await
                .unwrap()
                .as_deref(),
            Some("Batch 21")
        );
        assert_eq!(
            svc.display_name_of(&ctx, &AudienceScope::subgroup(&fx.subgroups[1].id))
                .await
                .unwrap()
                .as_deref(),
            Some("Lab B")
        );
        assert_eq!(
            svc.display_name_of(&ctx, &AudienceScope::subgroup("sgp-gone"))
                .await
                .unwrap(),
            None
        );
        let unknown = AudienceScope {
            kind: ScopeKind::Unknown,
            id: fx.group.id.clone(),
        };
        assert_eq!(svc.display_name_of(&ctx, &unknown).await.unwrap(), None);
    }

    #[tokio::test]
    async fn directory_covers_referenced_names() {
        let (svc, ctx) = test_service_with_institute().await;
        let fx = seed_timetable(&svc, &ctx).await;
        let course = svc
            .create_course(&ctx, &fx.operation.id, "Optics")
            .await
            .unwrap();
        let event = svc
            .create_event(
                &ctx,
                &NewEvent::new(
                    &fx.routine.id,
                    "Lab",
                    &fx.slots[0].id,
                    &fx.slots[0].id,
                    DayOfWeek::Sunday,
                    AudienceScope::subgroup(&fx.subgroups[0].id),
                )
                .with_course(&course.id),
            )
            .await
            .unwrap();

        let names = svc.load_name_directory(&ctx, &[event.clone()]).await.unwrap();
        assert_eq!(names.audience_name(&event.scope), Some("Lab A"));
        assert_eq!(names.course_name(&course.id), Some("Optics"));
        assert_eq!(
            names.audience_name(&AudienceScope::group(&fx.group.id)),
            None
        );
    }

    #[tokio::test]
    async fn selection_validation() {
        let (svc, ctx) = test_service_with_institute().await;
        let fx = seed_timetable(&svc, &ctx).await;

        let sel = svc
            .resolve_selection(&ctx, Some(&fx.group.id), Some(&fx.subgroups[0].id))
            .await
            .unwrap();
        assert_eq!(sel.subgroup_ids_of_group().len(), 2);

        assert!(svc.resolve_selection(&ctx, None, None).await.unwrap().is_empty());

        let err = svc
            .resolve_selection(&ctx, None, Some(&fx.subgroups[0].id))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Timetable(TimetableError::InvalidSelection(_))
        ));

        let err = svc
            .resolve_selection(&ctx, Some("grp-none"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }
}
