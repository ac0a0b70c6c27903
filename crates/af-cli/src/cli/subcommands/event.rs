use clap::{Args, Subcommand};

/// Recurring event commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EventCommands {
    /// Schedule an event into an open cell of a group or subgroup view.
    Create(EventCreateArgs),
    /// List events.
    List {
        #[arg(long)]
        routine: Option<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        subgroup: Option<String>,
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        course: Option<String>,
    },
    /// Get an event by ID.
    Get { id: String },
    /// Update an event.
    Update(EventUpdateArgs),
    /// Delete an event.
    Delete { id: String },
}

/// Arguments for `afl event create`.
#[derive(Clone, Debug, Args)]
pub struct EventCreateArgs {
    #[arg(long)]
    pub routine: String,
    /// Start slot; the cell must be open in the chosen view.
    #[arg(long)]
    pub slot: String,
    /// Defaults to the start slot.
    #[arg(long)]
    pub end_slot: Option<String>,
    #[arg(long)]
    pub day: String,
    #[arg(long)]
    pub group: String,
    /// Assign to this subgroup of the group instead of the whole group.
    #[arg(long)]
    pub subgroup: Option<String>,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub course: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub repeat_every: Option<u32>,
    #[arg(long)]
    pub start_week: Option<u32>,
    #[arg(long)]
    pub reschedulable: bool,
}

/// Arguments for `afl event update`.
#[derive(Clone, Debug, Args)]
pub struct EventUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_course")]
    pub course: Option<String>,
    #[arg(long)]
    pub clear_course: bool,
    #[arg(long)]
    pub start_slot: Option<String>,
    #[arg(long)]
    pub end_slot: Option<String>,
    #[arg(long)]
    pub day: Option<String>,
    #[arg(long)]
    pub repeat_every: Option<u32>,
    #[arg(long)]
    pub start_week: Option<u32>,
    #[arg(long)]
    pub reschedulable: Option<bool>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
}
