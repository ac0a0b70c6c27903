//! Recurring event repository.
//!
//! An event occupies the slot span `start_slot..=end_slot` (by serial) on one
//! day of the week, for one audience. Spans are validated on write; the
//! timetable engine still tolerates bad rows written by other clients.

use chrono::Utc;

use af_core::entities::{AudienceScope, RecurringEvent, Routine, Slot};
use af_core::enums::{AuditAction, DayOfWeek, EntityType, ScopeKind};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_EVENT;

use crate::error::DatabaseError;
use crate::helpers::{
    SetClause, get_bool, get_opt_string, get_u32, parse_datetime, parse_enum, to_detail,
};
use crate::service::AcademyService;
use crate::updates::event::EventUpdate;

const SELECT_COLS: &str = "id, routine_id, institute_id, title, course_id, start_slot_id, \
     end_slot_id, day_of_week, repeat_every, start_week, is_reschedulable, description, \
     scope_kind, scope_id, created_by, created_at, updated_at";

/// Input for [`AcademyService::create_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub routine_id: String,
    pub title: String,
    pub course_id: Option<String>,
    pub start_slot_id: String,
    pub end_slot_id: String,
    pub day_of_week: DayOfWeek,
    pub repeat_every: u32,
    pub start_week: u32,
    pub is_reschedulable: bool,
    pub description: Option<String>,
    pub scope: AudienceScope,
}

impl NewEvent {
    /// Weekly event starting in week 1, not reschedulable.
    #[must_use]
    pub fn new(
        routine_id: impl Into<String>,
        title: impl Into<String>,
        start_slot_id: impl Into<String>,
        end_slot_id: impl Into<String>,
        day_of_week: DayOfWeek,
        scope: AudienceScope,
    ) -> Self {
        Self {
            routine_id: routine_id.into(),
            title: title.into(),
            course_id: None,
            start_slot_id: start_slot_id.into(),
            end_slot_id: end_slot_id.into(),
            day_of_week,
            repeat_every: 1,
            start_week: 1,
            is_reschedulable: false,
            description: None,
            scope,
        }
    }

    #[must_use]
    pub fn with_course(mut self, course_id: impl Into<String>) -> Self {
        self.course_id = Some(course_id.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Filter criteria for event listings.
#[derive(Debug, Default)]
pub struct EventFilter {
    pub routine_id: Option<String>,
    pub scope: Option<AudienceScope>,
    pub day_of_week: Option<DayOfWeek>,
    pub course_id: Option<String>,
}

fn row_to_event(row: &libsql::Row) -> Result<RecurringEvent, DatabaseError> {
    Ok(RecurringEvent {
        id: row.get(0)?,
        routine_id: row.get(1)?,
        institute_id: row.get(2)?,
        title: row.get(3)?,
        course_id: get_opt_string(row, 4)?,
        start_slot_id: row.get(5)?,
        end_slot_id: row.get(6)?,
        day_of_week: parse_enum(&row.get::<String>(7)?)?,
        repeat_every: get_u32(row, 8)?,
        start_week: get_u32(row, 9)?,
        is_reschedulable: get_bool(row, 10)?,
        description: get_opt_string(row, 11)?,
        scope: AudienceScope {
            kind: parse_enum(&row.get::<String>(12)?)?,
            id: row.get(13)?,
        },
        created_by: get_opt_string(row, 14)?,
        created_at: parse_datetime(&row.get::<String>(15)?)?,
        updated_at: parse_datetime(&row.get::<String>(16)?)?,
    })
}

fn check_recurrence(repeat_every: u32, start_week: u32) -> Result<(), DatabaseError> {
    if repeat_every == 0 {
        return Err(DatabaseError::Validation(
            "repeat_every must be at least 1".into(),
        ));
    }
    if start_week == 0 {
        return Err(DatabaseError::Validation("start_week must be at least 1".into()));
    }
    Ok(())
}

impl AcademyService {
    /// Create an event after validating every reference against the
    /// routine's term.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` when the routine, slots, course,
    /// or audience do not exist or belong to another term, when the end slot
    /// precedes the start slot, or when the recurrence is not positive.
    pub async fn create_event(
        &self,
        ctx: &SessionContext,
        input: &NewEvent,
    ) -> Result<RecurringEvent, DatabaseError> {
        check_recurrence(input.repeat_every, input.start_week)?;
        let routine = self
            .get_routine(ctx, &input.routine_id)
            .await
            .map_err(|e| e.missing("routine", &input.routine_id))?;
        self.check_span(ctx, &routine, &input.start_slot_id, &input.end_slot_id)
            .await?;
        if let Some(ref course_id) = input.course_id {
            self.check_course(ctx, &routine, course_id).await?;
        }
        self.check_audience(ctx, &routine, &input.scope).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_EVENT).await?;
        self.db()
            .execute_with(
                &format!(
                    "INSERT INTO recurring_events ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
                ),
                || {
                    libsql::params![
                        id.as_str(),
                        input.routine_id.as_str(),
                        ctx.institute_id.as_str(),
                        input.title.as_str(),
                        input.course_id.as_deref(),
                        input.start_slot_id.as_str(),
                        input.end_slot_id.as_str(),
                        input.day_of_week.as_str(),
                        i64::from(input.repeat_every),
                        i64::from(input.start_week),
                        i64::from(input.is_reschedulable),
                        input.description.as_deref(),
                        input.scope.kind.as_str(),
                        input.scope.id.as_str(),
                        ctx.user_id.as_deref(),
                        now.to_rfc3339(),
                        now.to_rfc3339()
                    ]
                },
            )
            .await?;
        self.record(
            ctx,
            EntityType::RecurringEvent,
            &id,
            AuditAction::Created,
            None,
        )
        .await?;

        Ok(RecurringEvent {
            id,
            routine_id: input.routine_id.clone(),
            institute_id: ctx.institute_id.clone(),
            title: input.title.clone(),
            course_id: input.course_id.clone(),
            start_slot_id: input.start_slot_id.clone(),
            end_slot_id: input.end_slot_id.clone(),
            day_of_week: input.day_of_week,
            repeat_every: input.repeat_every,
            start_week: input.start_week,
            is_reschedulable: input.is_reschedulable,
            description: input.description.clone(),
            scope: input.scope.clone(),
            created_by: ctx.user_id.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Both slots must be in the routine's term and the end may not precede
    /// the start.
    async fn check_span(
        &self,
        ctx: &SessionContext,
        routine: &Routine,
        start_slot_id: &str,
        end_slot_id: &str,
    ) -> Result<(Slot, Slot), DatabaseError> {
        let start = self.term_slot(ctx, routine, start_slot_id).await?;
        let end = self.term_slot(ctx, routine, end_slot_id).await?;
        if end.serial_no < start.serial_no {
            return Err(DatabaseError::Validation(format!(
                "end slot {} (serial {}) precedes start slot {} (serial {})",
                end.id, end.serial_no, start.id, start.serial_no
            )));
        }
        Ok((start, end))
    }

    async fn term_slot(
        &self,
        ctx: &SessionContext,
        routine: &Routine,
        slot_id: &str,
    ) -> Result<Slot, DatabaseError> {
        let slot = self
            .get_slot(ctx, slot_id)
            .await
            .map_err(|e| e.missing("slot", slot_id))?;
        if slot.operation_id != routine.operation_id {
            return Err(DatabaseError::Validation(format!(
                "slot {slot_id} does not belong to the term of routine {}",
                routine.id
            )));
        }
        Ok(slot)
    }

    async fn check_course(
        &self,
        ctx: &SessionContext,
        routine: &Routine,
        course_id: &str,
    ) -> Result<(), DatabaseError> {
        let course = self
            .get_course(ctx, course_id)
            .await
            .map_err(|e| e.missing("course", course_id))?;
        if course.operation_id != routine.operation_id {
            return Err(DatabaseError::Validation(format!(
                "course {course_id} does not belong to the term of routine {}",
                routine.id
            )));
        }
        Ok(())
    }

    /// The audience must exist and belong to the program that owns the
    /// routine's term.
    async fn check_audience(
        &self,
        ctx: &SessionContext,
        routine: &Routine,
        scope: &AudienceScope,
    ) -> Result<(), DatabaseError> {
        let group_id = match scope.kind {
            ScopeKind::Group => scope.id.clone(),
            ScopeKind::Subgroup => {
                self.get_subgroup(ctx, &scope.id)
                    .await
                    .map_err(|e| e.missing("subgroup", &scope.id))?
                    .group_id
            }
            ScopeKind::Unknown => {
                return Err(DatabaseError::Validation(format!(
                    "unsupported audience kind for {}",
                    scope.id
                )));
            }
        };
        let group = self
            .get_group(ctx, &group_id)
            .await
            .map_err(|e| e.missing("group", &group_id))?;
        let operation = self.get_operation(ctx, &routine.operation_id).await?;
        if group.program_id != operation.program_id {
            return Err(DatabaseError::Validation(format!(
                "group {} is not part of program {}",
                group.id, operation.program_id
            )));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the event does not exist.
    pub async fn get_event(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<RecurringEvent, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!(
                    "SELECT {SELECT_COLS} FROM recurring_events WHERE id = ?1 AND institute_id = ?2"
                ),
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_event(&row)
    }

    /// Every event of a routine, unfiltered by audience. This is the event
    /// input of the timetable engine.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_routine_events(
        &self,
        ctx: &SessionContext,
        routine_id: &str,
    ) -> Result<Vec<RecurringEvent>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!(
                    "SELECT {SELECT_COLS} FROM recurring_events
                     WHERE routine_id = ?1 AND institute_id = ?2
                     ORDER BY created_at, rowid"
                ),
                || [routine_id, ctx.institute_id.as_str()],
            )
            .await?;
        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(row_to_event(&row)?);
        }
        Ok(events)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_events(
        &self,
        ctx: &SessionContext,
        filter: &EventFilter,
        limit: u32,
    ) -> Result<Vec<RecurringEvent>, DatabaseError> {
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut conditions = vec!["institute_id = ?1".to_string()];
        if let Some(ref routine_id) = filter.routine_id {
            params.push(routine_id.as_str().into());
            conditions.push(format!("routine_id = ?{}", params.len()));
        }
        if let Some(ref scope) = filter.scope {
            params.push(scope.kind.as_str().into());
            conditions.push(format!("scope_kind = ?{}", params.len()));
            params.push(scope.id.as_str().into());
            conditions.push(format!("scope_id = ?{}", params.len()));
        }
        if let Some(day) = filter.day_of_week {
            params.push(day.as_str().into());
            conditions.push(format!("day_of_week = ?{}", params.len()));
        }
        if let Some(ref course_id) = filter.course_id {
            params.push(course_id.as_str().into());
            conditions.push(format!("course_id = ?{}", params.len()));
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM recurring_events WHERE {}
             ORDER BY created_at, rowid LIMIT {limit}",
            conditions.join(" AND ")
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(row_to_event(&row)?);
        }
        Ok(events)
    }

    /// Apply an update, revalidating the span when either end moves.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` under the same rules as
    /// [`AcademyService::create_event`].
    pub async fn update_event(
        &self,
        ctx: &SessionContext,
        id: &str,
        update: EventUpdate,
    ) -> Result<RecurringEvent, DatabaseError> {
        let current = self.get_event(ctx, id).await?;
        check_recurrence(
            update.repeat_every.unwrap_or(current.repeat_every),
            update.start_week.unwrap_or(current.start_week),
        )?;
        let needs_routine = update.moves_span() || matches!(update.course_id, Some(Some(_)));
        if needs_routine {
            let routine = self.get_routine(ctx, &current.routine_id).await?;
            if update.moves_span() {
                let start = update
                    .start_slot_id
                    .as_deref()
                    .unwrap_or(&current.start_slot_id);
                let end = update.end_slot_id.as_deref().unwrap_or(&current.end_slot_id);
                self.check_span(ctx, &routine, start, end).await?;
            }
            if let Some(Some(ref course_id)) = update.course_id {
                self.check_course(ctx, &routine, course_id).await?;
            }
        }

        let mut set = SetClause::new();
        if let Some(ref title) = update.title {
            set.push("title", title.as_str());
        }
        if let Some(ref course_id) = update.course_id {
            set.push_opt("course_id", course_id.clone());
        }
        if let Some(ref start) = update.start_slot_id {
            set.push("start_slot_id", start.as_str());
        }
        if let Some(ref end) = update.end_slot_id {
            set.push("end_slot_id", end.as_str());
        }
        if let Some(day) = update.day_of_week {
            set.push("day_of_week", day.as_str());
        }
        if let Some(repeat_every) = update.repeat_every {
            set.push("repeat_every", i64::from(repeat_every));
        }
        if let Some(start_week) = update.start_week {
            set.push("start_week", i64::from(start_week));
        }
        if let Some(flag) = update.is_reschedulable {
            set.push("is_reschedulable", i64::from(flag));
        }
        if let Some(ref description) = update.description {
            set.push_opt("description", description.clone());
        }
        if set.is_empty() {
            return Ok(current);
        }
        set.push("updated_at", Utc::now().to_rfc3339());

        let (sql, params) = set.into_sql("recurring_events", id, &ctx.institute_id);
        self.db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        self.record(
            ctx,
            EntityType::RecurringEvent,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_event(ctx, id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the event does not exist.
    pub async fn delete_event(&self, ctx: &SessionContext, id: &str) -> Result<(), DatabaseError> {
        self.get_event(ctx, id).await?;
        self.db()
            .execute_with(
                "DELETE FROM recurring_events WHERE id = ?1 AND institute_id = ?2",
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        self.record(
            ctx,
            EntityType::RecurringEvent,
            id,
            AuditAction::Deleted,
            None,
        )
        .await
    }
}
