//! libSQL store configuration.

use serde::{Deserialize, Serialize};

fn default_local_path() -> String {
    ".academyflow/academyflow.db".to_string()
}

const fn default_max_attempts() -> u32 {
    4
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Remote database URL (e.g., `libsql://school.turso.io`). Empty for a
    /// local file store.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Database file used when no remote URL is configured.
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Attempts per remote call before a transient error is surfaced.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            local_path: default_local_path(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl StoreConfig {
    /// Remote mode needs both the URL and a token.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}
