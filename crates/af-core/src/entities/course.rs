use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A course taught during an operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub operation_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
