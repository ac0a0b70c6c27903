//! CLI response types returned as JSON by `afl` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Routine, Vacation};
use crate::enums::EntityType;

/// Response from every `afl <entity> delete`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeleteResponse {
    pub entity_type: EntityType,
    pub id: String,
    pub deleted: bool,
}

/// A routine together with the name of the operation it belongs to.
///
/// Returned by `afl routine list --program`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RoutineSummary {
    pub routine: Routine,
    pub operation_name: String,
    pub program_id: String,
}

/// A vacation with the resolved display name of its target.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VacationView {
    pub vacation: Vacation,
    pub target_name: Option<String>,
}
