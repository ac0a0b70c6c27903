//! Program update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProgramUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

pub struct ProgramUpdateBuilder(ProgramUpdate);

impl ProgramUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ProgramUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn department_id(mut self, department_id: Option<String>) -> Self {
        self.0.department_id = Some(department_id);
        self
    }

    #[must_use]
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.0.is_active = Some(is_active);
        self
    }

    #[must_use]
    pub fn build(self) -> ProgramUpdate {
        self.0
    }
}
