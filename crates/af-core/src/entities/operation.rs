use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::OperationStatus;

/// An academic term (semester) of a program. Scopes slots, courses, and routines.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Operation {
    pub id: String,
    pub program_id: String,
    pub name: String,
    pub status: OperationStatus,
    pub created_at: DateTime<Utc>,
}
