//! Operation update builder.

use af_core::enums::OperationStatus;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OperationStatus>,
}

pub struct OperationUpdateBuilder(OperationUpdate);

impl OperationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(OperationUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: OperationStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> OperationUpdate {
        self.0
    }
}
