//! Vacation repository.
//!
//! A vacation blocks a date range for the whole institute or for one
//! department, program, or operation.

use chrono::{NaiveDate, Utc};

use af_core::entities::Vacation;
use af_core::enums::{AuditAction, EntityType, VacationScope};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_VACATION;
use af_core::responses::VacationView;

use crate::error::DatabaseError;
use crate::helpers::{
    SetClause, format_date, get_opt_string, parse_date, parse_datetime, parse_enum, to_detail,
};
use crate::service::AcademyService;
use crate::updates::vacation::VacationUpdate;

const SELECT_COLS: &str =
    "id, institute_id, start_day, end_day, description, scope, target_id, created_at";

#[derive(Debug, Default)]
pub struct VacationFilter {
    pub scope: Option<VacationScope>,
    pub target_id: Option<String>,
    /// Only vacations covering this day.
    pub on: Option<NaiveDate>,
}

fn row_to_vacation(row: &libsql::Row) -> Result<Vacation, DatabaseError> {
    Ok(Vacation {
        id: row.get(0)?,
        institute_id: row.get(1)?,
        start_day: parse_date(&row.get::<String>(2)?)?,
        end_day: parse_date(&row.get::<String>(3)?)?,
        description: get_opt_string(row, 4)?,
        scope: parse_enum(&row.get::<String>(5)?)?,
        target_id: row.get(6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), DatabaseError> {
    if end < start {
        return Err(DatabaseError::Validation(format!(
            "vacation ends ({end}) before it starts ({start})"
        )));
    }
    Ok(())
}

impl AcademyService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an inverted range or a
    /// missing target.
    pub async fn create_vacation(
        &self,
        ctx: &SessionContext,
        start_day: NaiveDate,
        end_day: NaiveDate,
        description: Option<&str>,
        scope: VacationScope,
        target_id: Option<&str>,
    ) -> Result<Vacation, DatabaseError> {
        check_range(start_day, end_day)?;
        let target_id = self.resolve_vacation_target(ctx, scope, target_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_VACATION).await?;
        self.db()
            .execute_with(
                "INSERT INTO vacations (id, institute_id, start_day, end_day, description, scope, target_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                || {
                    libsql::params![
                        id.as_str(),
                        ctx.institute_id.as_str(),
                        format_date(start_day),
                        format_date(end_day),
                        description,
                        scope.as_str(),
                        target_id.as_str(),
                        now.to_rfc3339()
                    ]
                },
            )
            .await?;
        self.record(ctx, EntityType::Vacation, &id, AuditAction::Created, None)
            .await?;

        Ok(Vacation {
            id,
            institute_id: ctx.institute_id.clone(),
            start_day,
            end_day,
            description: description.map(String::from),
            scope,
            target_id,
            created_at: now,
        })
    }

    /// `All` always targets the session's institute; other scopes need an
    /// existing row of the matching kind.
    async fn resolve_vacation_target(
        &self,
        ctx: &SessionContext,
        scope: VacationScope,
        target_id: Option<&str>,
    ) -> Result<String, DatabaseError> {
        if scope == VacationScope::All {
            return Ok(ctx.institute_id.clone());
        }
        let target = target_id.ok_or_else(|| {
            DatabaseError::Validation(format!("a {scope} vacation needs a target id"))
        })?;
        let found = match scope {
            VacationScope::Department => self.get_department(ctx, target).await.map(|_| ()),
            VacationScope::Program => self.get_program(ctx, target).await.map(|_| ()),
            VacationScope::Operation => self.get_operation(ctx, target).await.map(|_| ()),
            VacationScope::All => Ok(()),
        };
        found.map_err(|e| e.missing(scope.as_str(), target))?;
        Ok(target.to_string())
    }

    async fn vacation_target_name(
        &self,
        ctx: &SessionContext,
        vacation: &Vacation,
    ) -> Result<Option<String>, DatabaseError> {
        let target = vacation.target_id.as_str();
        let name = match vacation.scope {
            VacationScope::All => self.get_institute(target).await.map(|i| i.name),
            VacationScope::Department => self.get_department(ctx, target).await.map(|d| d.name),
            VacationScope::Program => self.get_program(ctx, target).await.map(|p| p.name),
            VacationScope::Operation => self.get_operation(ctx, target).await.map(|o| o.name),
        };
        match name {
            Ok(name) => Ok(Some(name)),
            Err(DatabaseError::NoResult) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the vacation does not exist.
    pub async fn get_vacation(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<Vacation, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM vacations WHERE id = ?1 AND institute_id = ?2"),
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_vacation(&row)
    }

    /// Vacations by start day, each with the name of what it targets.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn list_vacations(
        &self,
        ctx: &SessionContext,
        filter: &VacationFilter,
        limit: u32,
    ) -> Result<Vec<VacationView>, DatabaseError> {
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut conditions = vec!["institute_id = ?1".to_string()];
        if let Some(scope) = filter.scope {
            params.push(scope.as_str().into());
            conditions.push(format!("scope = ?{}", params.len()));
        }
        if let Some(ref target) = filter.target_id {
            params.push(target.as_str().into());
            conditions.push(format!("target_id = ?{}", params.len()));
        }
        if let Some(day) = filter.on {
            params.push(format_date(day).into());
            let idx = params.len();
            conditions.push(format!("start_day <= ?{idx} AND end_day >= ?{idx}"));
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM vacations WHERE {} ORDER BY start_day LIMIT {limit}",
            conditions.join(" AND ")
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut vacations = Vec::new();
        while let Some(row) = rows.next().await? {
            vacations.push(row_to_vacation(&row)?);
        }

        let mut views = Vec::with_capacity(vacations.len());
        for vacation in vacations {
            let target_name = self.vacation_target_name(ctx, &vacation).await?;
            views.push(VacationView {
                vacation,
                target_name,
            });
        }
        Ok(views)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the merged range is inverted
    /// or the new target is missing.
    pub async fn update_vacation(
        &self,
        ctx: &SessionContext,
        id: &str,
        update: VacationUpdate,
    ) -> Result<Vacation, DatabaseError> {
        let current = self.get_vacation(ctx, id).await?;
        check_range(
            update.start_day.unwrap_or(current.start_day),
            update.end_day.unwrap_or(current.end_day),
        )?;

        let mut set = SetClause::new();
        if let Some(day) = update.start_day {
            set.push("start_day", format_date(day));
        }
        if let Some(day) = update.end_day {
            set.push("end_day", format_date(day));
        }
        if let Some(ref description) = update.description {
            set.push_opt("description", description.clone());
        }
        if let Some((scope, ref target)) = update.target {
            let target_id = self
                .resolve_vacation_target(ctx, scope, target.as_deref())
                .await?;
            set.push("scope", scope.as_str());
            set.push("target_id", target_id);
        }
        if set.is_empty() {
            return Ok(current);
        }

        let (sql, params) = set.into_sql("vacations", id, &ctx.institute_id);
        self.db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        self.record(
            ctx,
            EntityType::Vacation,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_vacation(ctx, id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the vacation does not exist.
    pub async fn delete_vacation(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<(), DatabaseError> {
        self.get_vacation(ctx, id).await?;
        self.db()
            .execute_with(
                "DELETE FROM vacations WHERE id = ?1 AND institute_id = ?2",
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        self.record(ctx, EntityType::Vacation, id, AuditAction::Deleted, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{seed_operation, test_service_with_institute};
    use crate::updates::vacation::VacationUpdateBuilder;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[tokio::test]
    async fn institute_wide_vacation_targets_institute() {
        let (svc, ctx) = test_service_with_institute().await;
        let vac = svc
            .create_vacation(&ctx, day(12, 20), day(12, 31), Some("Winter"), VacationScope::All, None)
            .await
            .unwrap();
        assert_eq!(vac.target_id, ctx.institute_id);

        let views = svc
            .list_vacations(&ctx, &VacationFilter::default(), 10)
            .await
            .unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].target_name.as_deref(), Some("North Campus"));
    }

    #[tokio::test]
    async fn program_vacation_resolves_name_and_filters_by_day() {
        let (svc, ctx) = test_service_with_institute().await;
        let op = seed_operation(&svc, &ctx).await;
        svc.create_vacation(
            &ctx,
            day(3, 1),
            day(3, 3),
            None,
            VacationScope::Program,
            Some(&op.program_id),
        )
        .await
        .unwrap();
        svc.create_vacation(&ctx, day(4, 10), day(4, 10), None, VacationScope::All, None)
            .await
            .unwrap();

        let on = svc
            .list_vacations(
                &ctx,
                &VacationFilter {
                    on: Some(day(3, 3)),
                    ..Default::default()
                },
                10,
            )
            .await
            .unwrap();
        assert_eq!(on.len(), 1);
        assert_eq!(on[0].target_name.as_deref(), Some("BSc Physics"));
    }

    #[tokio::test]
    async fn inverted_range_and_missing_target_rejected() {
        let (svc, ctx) = test_service_with_institute().await;
        assert!(matches!(
            svc.create_vacation(&ctx, day(5, 2), day(5, 1), None, VacationScope::All, None)
                .await,
            Err(DatabaseError::Validation(_))
        ));
        assert!(matches!(
            svc.create_vacation(&ctx, day(5, 1), day(5, 2), None, VacationScope::Department, None)
                .await,
            Err(DatabaseError::Validation(_))
        ));
        assert!(matches!(
            svc.create_vacation(
                &ctx,
                day(5, 1),
                day(5, 2),
                None,
                VacationScope::Operation,
                Some("opr-none")
            )
            .await,
            Err(DatabaseError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_checks_merged_range() {
        let (svc, ctx) = test_service_with_institute().await;
        let vac = svc
            .create_vacation(&ctx, day(6, 1), day(6, 5), None, VacationScope::All, None)
            .await
            .unwrap();
        assert!(
            svc.update_vacation(&ctx, &vac.id, VacationUpdateBuilder::new().start_day(day(6, 9)).build())
                .await
                .is_err()
        );
        let moved = svc
            .update_vacation(
                &ctx,
                &vac.id,
                VacationUpdateBuilder::new()
                    .end_day(day(6, 12))
                    .description(Some("Eid".into()))
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(moved.end_day, day(6, 12));
        assert_eq!(moved.description.as_deref(), Some("Eid"));
    }
}
