use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tenant root. Every other entity is reachable from exactly one institute.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Institute {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
