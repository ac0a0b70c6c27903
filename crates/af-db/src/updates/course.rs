//! Course update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub struct CourseUpdateBuilder(CourseUpdate);

impl CourseUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(CourseUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn build(self) -> CourseUpdate {
        self.0
    }
}
