//! Vacation update builder.

use af_core::enums::VacationScope;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct VacationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_day: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_day: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New target; `None` inside means the whole institute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<(VacationScope, Option<String>)>,
}

pub struct VacationUpdateBuilder(VacationUpdate);

impl VacationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(VacationUpdate::default())
    }

    #[must_use]
    pub fn start_day(mut self, day: NaiveDate) -> Self {
        self.0.start_day = Some(day);
        self
    }

    #[must_use]
    pub fn end_day(mut self, day: NaiveDate) -> Self {
        self.0.end_day = Some(day);
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn target(mut self, scope: VacationScope, target_id: Option<String>) -> Self {
        self.0.target = Some((scope, target_id));
        self
    }

    #[must_use]
    pub fn build(self) -> VacationUpdate {
        self.0
    }
}
