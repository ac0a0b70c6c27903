use clap::Subcommand;

/// Routine commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RoutineCommands {
    /// Create a routine for a term.
    Create {
        #[arg(long)]
        operation: String,
        #[arg(long)]
        name: String,
    },
    /// List routines of a term or a program.
    List {
        #[arg(long)]
        operation: Option<String>,
        #[arg(long)]
        program: Option<String>,
    },
    /// Get a routine by ID.
    Get { id: String },
    /// Rename a routine.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a routine and its events.
    Delete { id: String },
    /// Show the weekly grid as seen by a group or subgroup.
    Grid {
        routine: String,
        #[arg(long)]
        group: Option<String>,
        #[arg(long, requires = "group")]
        subgroup: Option<String>,
    },
}
