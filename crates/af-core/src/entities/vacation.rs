use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::VacationScope;

/// A closed date range during which no teaching takes place for its target.
///
/// For `VacationScope::All` the `target_id` is the institute itself.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Vacation {
    pub id: String,
    pub institute_id: String,
    pub start_day: NaiveDate,
    pub end_day: NaiveDate,
    pub description: Option<String>,
    pub scope: VacationScope,
    pub target_id: String,
    pub created_at: DateTime<Utc>,
}

impl Vacation {
    /// Whether `day` falls inside the inclusive vacation range.
    #[must_use]
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_day <= day && day <= self.end_day
    }
}
