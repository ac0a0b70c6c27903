use std::path::Path;

use af_config::AcademyConfig;
use anyhow::Context;

/// Load `.env` from the project root, then the layered config.
pub fn load_config(project_root: &Path) -> anyhow::Result<AcademyConfig> {
    load_project_dotenv(project_root)?;

    let config = AcademyConfig::load_in(project_root).context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn load_project_dotenv(project_root: &Path) -> anyhow::Result<()> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        tracing::debug!(path = %env_path.display(), "loaded project dotenv");
        return Ok(());
    }
    dotenvy::dotenv().ok();
    Ok(())
}
