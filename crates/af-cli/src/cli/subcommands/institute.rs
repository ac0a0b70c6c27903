use clap::Subcommand;

/// Institute commands. These run without a selected institute.
#[derive(Clone, Debug, Subcommand)]
pub enum InstituteCommands {
    /// Create an institute.
    Create {
        #[arg(long)]
        name: String,
    },
    /// List institutes.
    List,
    /// Get an institute by ID.
    Get { id: String },
}
