use std::path::Path;

use af_config::{AcademyConfig, ConfigError};
use af_core::identity::SessionContext;
use af_db::service::AcademyService;
use anyhow::Context;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: AcademyService,
    pub config: AcademyConfig,
    session: Result<SessionContext, ConfigError>,
}

impl AppContext {
    /// Open the store and build the session from config plus the
    /// `--institute` override.
    pub async fn init(
        project_root: &Path,
        mut config: AcademyConfig,
        institute_override: Option<&str>,
    ) -> anyhow::Result<Self> {
        config.store.local_path = resolve_local_path(project_root, &config.store.local_path);
        tracing::debug!(root = %project_root.display(), "project root resolved");

        let service = AcademyService::from_config(&config.store)
            .await
            .context("failed to open the academyflow store")?;

        let session = session_from(&config, institute_override);
        if let Ok(ctx) = &session {
            tracing::debug!(institute = %ctx.institute_id, user = ?ctx.user_id, "session resolved");
        }

        Ok(Self {
            service,
            config,
            session,
        })
    }

    /// The session every institute-scoped command runs under.
    pub fn session(&self) -> anyhow::Result<&SessionContext> {
        self.session
            .as_ref()
            .map_err(|e| anyhow::anyhow!("no institute selected: {e}"))
    }

    /// Acting user, when configured.
    pub fn user_id(&self) -> Option<&str> {
        self.config.session.user()
    }

    /// Default page size for list commands.
    pub const fn default_limit(&self) -> u32 {
        self.config.general.default_limit
    }
}

fn session_from(
    config: &AcademyConfig,
    institute_override: Option<&str>,
) -> Result<SessionContext, ConfigError> {
    let institute = config.session.require_institute(institute_override)?;
    Ok(SessionContext::new(
        institute,
        config.session.user().map(String::from),
    ))
}

/// Relative store paths are taken from the project root, not the cwd.
fn resolve_local_path(project_root: &Path, local_path: &str) -> String {
    if local_path == ":memory:" || Path::new(local_path).is_absolute() {
        return local_path.to_string();
    }
    project_root.join(local_path).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use af_config::{AcademyConfig, ConfigError};
    use pretty_assertions::assert_eq;

    use super::{resolve_local_path, session_from};

    #[test]
    fn relative_store_path_is_joined_to_project_root() {
        let resolved = resolve_local_path(Path::new("/srv/school"), ".academyflow/academyflow.db");
        assert_eq!(
            Path::new(&resolved),
            Path::new("/srv/school/.academyflow/academyflow.db")
        );
    }

    #[test]
    fn absolute_and_memory_paths_are_untouched() {
        assert_eq!(resolve_local_path(Path::new("/srv"), ":memory:"), ":memory:");
        assert_eq!(
            resolve_local_path(Path::new("/srv"), "/var/lib/af.db"),
            "/var/lib/af.db"
        );
    }

    #[test]
    fn institute_flag_overrides_config() {
        let mut config = AcademyConfig::default();
        config.session.institute_id = "ins-config".into();
        config.session.user_id = "usr-1".into();

        let ctx = session_from(&config, Some("ins-flag")).expect("session");
        assert_eq!(ctx.institute_id, "ins-flag");
        assert_eq!(ctx.user_id.as_deref(), Some("usr-1"));

        let ctx = session_from(&config, None).expect("session");
        assert_eq!(ctx.institute_id, "ins-config");
    }

    #[test]
    fn no_institute_means_no_session() {
        let config = AcademyConfig::default();
        assert!(session_from(&config, None).is_err());
        assert!(session_from(&config, Some("")).is_err());
    }
}
