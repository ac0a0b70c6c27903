use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DayOfWeek, ScopeKind};

/// The group or subgroup an event is assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct AudienceScope {
    pub kind: ScopeKind,
    pub id: String,
}

impl AudienceScope {
    #[must_use]
    pub fn group(id: impl Into<String>) -> Self {
        Self {
            kind: ScopeKind::Group,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn subgroup(id: impl Into<String>) -> Self {
        Self {
            kind: ScopeKind::Subgroup,
            id: id.into(),
        }
    }

    /// True when this scope is exactly `(kind, id)`.
    #[must_use]
    pub fn is(&self, kind: ScopeKind, id: &str) -> bool {
        self.kind == kind && self.id == id
    }
}

/// A weekly activity on one day, spanning the inclusive slot range
/// `[start_slot_id, end_slot_id]` of its routine's term.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecurringEvent {
    pub id: String,
    pub routine_id: String,
    pub institute_id: String,
    pub title: String,
    pub course_id: Option<String>,
    pub start_slot_id: String,
    pub end_slot_id: String,
    pub day_of_week: DayOfWeek,
    /// Weeks between occurrences.
    pub repeat_every: u32,
    /// First teaching week the event occurs in.
    pub start_week: u32,
    pub is_reschedulable: bool,
    pub description: Option<String>,
    pub scope: AudienceScope,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
