//! Session context defaults: the institute and user store calls run as.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub institute_id: String,

    /// Acting user recorded in the audit trail.
    #[serde(default)]
    pub user_id: String,
}

impl SessionConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.institute_id.is_empty()
    }

    /// The institute to run under: a non-empty `override_id` wins over the
    /// configured one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when neither is set.
    pub fn require_institute<'a>(
        &'a self,
        override_id: Option<&'a str>,
    ) -> Result<&'a str, ConfigError> {
        override_id
            .filter(|id| !id.is_empty())
            .or_else(|| Some(self.institute_id.as_str()).filter(|id| !id.is_empty()))
            .ok_or_else(|| ConfigError::NotConfigured {
                section: "session".into(),
                hint: "pass --institute or set session.institute_id \
                       (ACADEMYFLOW_SESSION__INSTITUTE_ID)"
                    .into(),
            })
    }

    /// `user_id` as an option, empty meaning anonymous.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        Some(self.user_id.as_str()).filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_beats_configured_institute() {
        let session = SessionConfig {
            institute_id: "ins-config".into(),
            user_id: String::new(),
        };
        assert_eq!(session.require_institute(Some("ins-flag")).unwrap(), "ins-flag");
        assert_eq!(session.require_institute(Some("")).unwrap(), "ins-config");
        assert_eq!(session.require_institute(None).unwrap(), "ins-config");
        assert!(session.user().is_none());
    }

    #[test]
    fn missing_institute_names_the_section() {
        let err = SessionConfig::default().require_institute(None).unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { .. }));
        assert!(err.to_string().starts_with("[session] is not set"));
    }
}
