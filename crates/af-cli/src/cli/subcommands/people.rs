use clap::Subcommand;

/// Vacation commands. Days are `YYYY-MM-DD`.
#[derive(Clone, Debug, Subcommand)]
pub enum VacationCommands {
    /// Create a vacation.
    Create {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// all, department, program, operation
        #[arg(long, default_value = "all")]
        scope: String,
        /// Department, program, or operation ID; unused for `all`.
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List vacations.
    List {
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        target: Option<String>,
        /// Only vacations covering this day.
        #[arg(long)]
        on: Option<String>,
    },
    /// Get a vacation by ID.
    Get { id: String },
    /// Update a vacation.
    Update {
        id: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        scope: Option<String>,
        #[arg(long, requires = "scope")]
        target: Option<String>,
    },
    /// Delete a vacation.
    Delete { id: String },
}

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Create a user.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// admin, moderator, teacher, observer, student
        #[arg(long)]
        role: String,
        #[arg(long)]
        program: Option<String>,
        #[arg(long)]
        representative: bool,
    },
    /// List users.
    List {
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        program: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Get a user by ID.
    Get { id: String },
    /// Update a user.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long, conflicts_with = "clear_program")]
        program: Option<String>,
        #[arg(long)]
        clear_program: bool,
        #[arg(long)]
        representative: Option<bool>,
    },
    /// Delete a user.
    Delete { id: String },
}
