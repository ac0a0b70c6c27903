use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("afl error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let project_root = resolve_project_root(flags.project.as_deref())?;
    let config = bootstrap::load_config(&project_root)?;
    context::warn_unconfigured(&config);

    let ctx = context::AppContext::init(&project_root, config, flags.institute.as_deref())
        .await
        .context("failed to initialize academyflow application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ACADEMYFLOW_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// `--project` wins; otherwise walk up from the cwd for `.academyflow`, and
/// fall back to the cwd itself so a first run creates the store there.
fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == af_config::PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(std::path::Path::to_path_buf)
                .context("invalid --project path: '.academyflow' directory has no parent");
        }

        if explicit.is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(context::find_project_root(&cwd).unwrap_or(cwd))
}
