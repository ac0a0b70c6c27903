use clap::Subcommand;

/// Slot catalog commands. Times are `HH:MM` (24-hour).
#[derive(Clone, Debug, Subcommand)]
pub enum SlotCommands {
    /// Add a slot to a term.
    Create {
        #[arg(long)]
        operation: String,
        #[arg(long)]
        serial: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// List a term's slots in serial order.
    List {
        #[arg(long)]
        operation: String,
    },
    /// Get a slot by ID.
    Get { id: String },
    /// Update a slot.
    Update {
        id: String,
        #[arg(long)]
        serial: Option<i64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete a slot and the events starting or ending on it.
    Delete { id: String },
}
