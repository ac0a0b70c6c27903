use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named timetable of a term, holding recurring events.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Routine {
    pub id: String,
    pub operation_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
