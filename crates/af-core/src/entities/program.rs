use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A degree program offered by an institute, optionally owned by a department.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Program {
    pub id: String,
    pub institute_id: String,
    pub department_id: Option<String>,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
