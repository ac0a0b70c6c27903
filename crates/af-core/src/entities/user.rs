use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// A student or staff member. `program_id` and `is_representative` only
/// carry meaning for students.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub institute_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub program_id: Option<String>,
    pub is_representative: bool,
    pub created_at: DateTime<Utc>,
}
