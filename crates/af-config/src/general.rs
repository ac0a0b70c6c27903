//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}
