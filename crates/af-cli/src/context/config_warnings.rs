use af_config::{AcademyConfig, ENV_PREFIX};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &AcademyConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &AcademyConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    let store_prefix = format!("{ENV_PREFIX}STORE");
    if config.store.url.is_empty() && has_env_prefix(&env_keys, &store_prefix) {
        warnings.push(format!(
            "store config appears local while {store_prefix}* env vars exist. \
             Use double underscores (example: {ENV_PREFIX}STORE__URL)."
        ));
    }

    let session_prefix = format!("{ENV_PREFIX}SESSION");
    if !config.session.is_configured() && has_env_prefix(&env_keys, &session_prefix) {
        warnings.push(format!(
            "no institute configured while {session_prefix}* env vars exist. \
             Use double underscores (example: {ENV_PREFIX}SESSION__INSTITUTE_ID)."
        ));
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&format!("{prefix}__")))
}

#[cfg(test)]
mod tests {
    use af_config::AcademyConfig;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_keys() {
        let config = AcademyConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("ACADEMYFLOW_STORE_URL".to_string(), "libsql://demo".to_string()),
                ("ACADEMYFLOW_SESSION_INSTITUTE_ID".to_string(), "ins-1".to_string()),
            ],
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("ACADEMYFLOW_STORE__URL"));
    }

    #[test]
    fn does_not_warn_when_sections_are_configured() {
        let mut config = AcademyConfig::default();
        config.store.url = "libsql://demo".into();
        config.session.institute_id = "ins-1".into();

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("ACADEMYFLOW_STORE_URL".to_string(), "libsql://demo".to_string()),
                ("ACADEMYFLOW_SESSION_INSTITUTE_ID".to_string(), "ins-1".to_string()),
            ],
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn correctly_separated_keys_are_not_flagged() {
        let config = AcademyConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![("ACADEMYFLOW_STORE__LOCAL_PATH".to_string(), "x.db".to_string())],
        );
        assert!(warnings.is_empty());
    }
}
