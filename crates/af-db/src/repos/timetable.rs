//! Loading a routine's timetable and scheduling into an open cell.

use af_core::entities::RecurringEvent;
use af_core::enums::DayOfWeek;
use af_core::identity::SessionContext;
use af_timetable::{Timetable, compute};

use crate::error::DatabaseError;
use crate::repos::recurring_event::NewEvent;
use crate::service::AcademyService;

/// A request to place an event by picking a cell in a timetable view.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRequest {
    pub routine_id: String,
    pub group_id: Option<String>,
    pub subgroup_id: Option<String>,
    pub slot_id: String,
    /// Defaults to `slot_id` for a single-slot event.
    pub end_slot_id: Option<String>,
    pub day: Option<DayOfWeek>,
    pub title: String,
    pub course_id: Option<String>,
    pub description: Option<String>,
    pub repeat_every: Option<u32>,
    pub start_week: Option<u32>,
    pub is_reschedulable: bool,
}

impl AcademyService {
    /// Compute the timetable of `routine_id` as seen by the selected group
    /// or subgroup.
    ///
    /// Data warnings are logged and kept on the returned timetable.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown routine, and the
    /// errors of [`AcademyService::resolve_selection`] for a bad selection.
    pub async fn load_timetable(
        &self,
        ctx: &SessionContext,
        routine_id: &str,
        group_id: Option<&str>,
        subgroup_id: Option<&str>,
    ) -> Result<Timetable, DatabaseError> {
        let routine = self.get_routine(ctx, routine_id).await?;
        let selection = self.resolve_selection(ctx, group_id, subgroup_id).await?;
        let slots = self.list_slots(ctx, &routine.operation_id).await?;
        let events: Vec<RecurringEvent> = self.list_routine_events(ctx, routine_id).await?;
        let names = self.load_name_directory(ctx, &events).await?;

        let timetable = compute(&slots, &events, &selection, &names);
        for warning in timetable.warnings() {
            tracing::warn!(routine = routine_id, event = warning.event_id(), "{warning}");
        }
        tracing::debug!(
            routine = routine_id,
            slots = slots.len(),
            events = events.len(),
            blocks = timetable.blocks().len(),
            "computed timetable"
        );
        Ok(timetable)
    }

    /// Create an event from a click on an open cell of a timetable view.
    ///
    /// The start cell must be open in the view, the end slot must be one of
    /// the end-slot options for the start, and the event is assigned to the
    /// view's exact audience.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Timetable` for a covered cell or unknown slot,
    /// and `DatabaseError::Validation` when no group is selected, the day is
    /// missing, or the end slot precedes the start.
    pub async fn schedule_event(
        &self,
        ctx: &SessionContext,
        request: &ScheduleRequest,
    ) -> Result<RecurringEvent, DatabaseError> {
        let day = request
            .day
            .ok_or_else(|| DatabaseError::Validation("a day of the week is required".into()))?;
        let timetable = self
            .load_timetable(
                ctx,
                &request.routine_id,
                request.group_id.as_deref(),
                request.subgroup_id.as_deref(),
            )
            .await?;

        let target = timetable.open_cell(&request.slot_id, day)?;
        let scope = target.scope.ok_or_else(|| {
            DatabaseError::Validation("select a group before scheduling an event".into())
        })?;
        let end_slot_id = request
            .end_slot_id
            .clone()
            .unwrap_or_else(|| target.slot_id.clone());
        if !timetable
            .end_slot_options(&target.slot_id)?
            .iter()
            .any(|col| col.slot_id == end_slot_id)
        {
            return Err(DatabaseError::Validation(format!(
                "slot {end_slot_id} is not a valid end for an event starting at {}",
                target.slot_id
            )));
        }

        let input = NewEvent {
            routine_id: request.routine_id.clone(),
            title: request.title.clone(),
            course_id: request.course_id.clone(),
            start_slot_id: target.slot_id,
            end_slot_id,
            day_of_week: target.day,
            repeat_every: request.repeat_every.unwrap_or(1),
            start_week: request.start_week.unwrap_or(1),
            is_reschedulable: request.is_reschedulable,
            description: request.description.clone(),
            scope,
        };
        self.create_event(ctx, &input).await
    }
}
