//! Department update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DepartmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub struct DepartmentUpdateBuilder(DepartmentUpdate);

impl DepartmentUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(DepartmentUpdate::default())
    }

    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.0.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn build(self) -> DepartmentUpdate {
        self.0
    }
}
