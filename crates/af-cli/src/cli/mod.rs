use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `afl` binary.
#[derive(Debug, Parser)]
#[command(name = "afl", version, about = "AcademyFlow - academic routine manager")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to auto-detect via .academyflow)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Institute to act on (overrides session.institute_id)
    #[arg(short, long, global = true)]
    pub institute: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            project: self.project.clone(),
            institute: self.institute.clone(),
        }
    }
}
