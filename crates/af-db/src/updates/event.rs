//! Recurring event update builder.
//!
//! The audience scope and owning routine are fixed at creation. Moving an
//! event to another audience is a delete and re-create through the grid.

use af_core::enums::DayOfWeek;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_slot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_slot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_every: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_week: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_reschedulable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl EventUpdate {
    /// Whether the slot span or day changes.
    #[must_use]
    pub const fn moves_span(&self) -> bool {
        self.start_slot_id.is_some() || self.end_slot_id.is_some() || self.day_of_week.is_some()
    }
}

pub struct EventUpdateBuilder(EventUpdate);

impl EventUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(EventUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn course_id(mut self, course_id: Option<String>) -> Self {
        self.0.course_id = Some(course_id);
        self
    }

    #[must_use]
    pub fn start_slot_id(mut self, slot_id: impl Into<String>) -> Self {
        self.0.start_slot_id = Some(slot_id.into());
        self
    }

    #[must_use]
    pub fn end_slot_id(mut self, slot_id: impl Into<String>) -> Self {
        self.0.end_slot_id = Some(slot_id.into());
        self
    }

    #[must_use]
    pub fn day_of_week(mut self, day: DayOfWeek) -> Self {
        self.0.day_of_week = Some(day);
        self
    }

    #[must_use]
    pub fn repeat_every(mut self, weeks: u32) -> Self {
        self.0.repeat_every = Some(weeks);
        self
    }

    #[must_use]
    pub fn start_week(mut self, week: u32) -> Self {
        self.0.start_week = Some(week);
        self
    }

    #[must_use]
    pub fn is_reschedulable(mut self, flag: bool) -> Self {
        self.0.is_reschedulable = Some(flag);
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn build(self) -> EventUpdate {
        self.0
    }
}
