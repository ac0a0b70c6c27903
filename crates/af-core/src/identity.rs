use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Explicit session context passed into every institute-scoped store call.
///
/// Replaces ambient "current institute / current user" lookups. Built once
/// by the CLI from configuration and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionContext {
    /// Institute every query and mutation is scoped to.
    pub institute_id: String,
    /// Acting user, recorded as `created_by` and in the audit trail.
    pub user_id: Option<String>,
}

impl SessionContext {
    #[must_use]
    pub fn new(institute_id: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            institute_id: institute_id.into(),
            user_id,
        }
    }
}
