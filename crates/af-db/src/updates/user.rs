//! User update builder.

use af_core::enums::Role;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_representative: Option<bool>,
}

pub struct UserUpdateBuilder(UserUpdate);

impl UserUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(UserUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.0.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.0.role = Some(role);
        self
    }

    #[must_use]
    pub fn program_id(mut self, program_id: Option<String>) -> Self {
        self.0.program_id = Some(program_id);
        self
    }

    #[must_use]
    pub fn is_representative(mut self, flag: bool) -> Self {
        self.0.is_representative = Some(flag);
        self
    }

    #[must_use]
    pub fn build(self) -> UserUpdate {
        self.0
    }
}
