//! Routine update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoutineUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub struct RoutineUpdateBuilder(RoutineUpdate);

impl RoutineUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(RoutineUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn build(self) -> RoutineUpdate {
        self.0
    }
}
