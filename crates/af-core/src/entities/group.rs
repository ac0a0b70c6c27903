use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A student group within a program.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub program_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A subdivision of a group. The parent group is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Subgroup {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
