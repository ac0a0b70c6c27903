//! # af-config
//!
//! Layered configuration loading for AcademyFlow using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ACADEMYFLOW_*` prefix, `__` as separator)
//! 2. Project-level `.academyflow/config.toml`
//! 3. User-level `~/.config/academyflow/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ACADEMYFLOW_STORE__URL` -> `store.url`,
//! `ACADEMYFLOW_SESSION__INSTITUTE_ID` -> `session.institute_id`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use af_config::AcademyConfig;
//!
//! let config = AcademyConfig::load_with_dotenv().expect("config");
//! if config.store.is_remote() {
//!     println!("Remote store: {}", config.store.url);
//! }
//! ```

mod error;
mod general;
mod session;
mod store;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use session::SessionConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local configuration directory.
pub const PROJECT_DIR: &str = ".academyflow";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "ACADEMYFLOW_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AcademyConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AcademyConfig {
    /// Load configuration for the current directory.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_in(Path::new("."))
    }

    /// Load configuration with `project_root` as the project directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse.
    pub fn load_in(project_root: &Path) -> Result<Self, ConfigError> {
        Self::figment_in(project_root)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the provider chain for the current directory.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_in(Path::new("."))
    }

    /// Build the provider chain with `project_root` as the project directory.
    #[must_use]
    pub fn figment_in(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = Self::project_config_path(project_root);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// `.academyflow/config.toml` under `project_root`.
    #[must_use]
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("config.toml")
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("academyflow").join("config.toml"))
    }

    /// Validate values figment cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero retry budget or a
    /// remote URL without an auth token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !self.store.url.is_empty() && self.store.auth_token.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.auth_token".into(),
                reason: "required when store.url is set".into(),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_local() {
        let config = AcademyConfig::default();
        assert!(!config.store.is_remote());
        assert!(!config.session.is_configured());
        assert_eq!(config.general.default_limit, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn remote_url_requires_token() {
        let mut config = AcademyConfig::default();
        config.store.url = "libsql://school.turso.io".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("store.auth_token"));
    }

    #[test]
    fn zero_attempts_rejected() {
        let mut config = AcademyConfig::default();
        config.store.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
