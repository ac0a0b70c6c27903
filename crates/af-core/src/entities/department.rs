use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An academic department. `code` is unique within its institute.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Department {
    pub id: String,
    pub institute_id: String,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
