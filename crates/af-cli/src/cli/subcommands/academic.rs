use clap::Subcommand;

/// Department commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DepartmentCommands {
    /// Create a department.
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
    },
    /// List departments.
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Get a department by ID.
    Get { id: String },
    /// Update a department.
    Update {
        id: String,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a department.
    Delete { id: String },
}

/// Program commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProgramCommands {
    /// Create a program.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        department: Option<String>,
    },
    /// List programs.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        active_only: bool,
    },
    /// Get a program by ID.
    Get { id: String },
    /// Update a program.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_department")]
        department: Option<String>,
        #[arg(long)]
        clear_department: bool,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a program and everything under it.
    Delete { id: String },
}

/// Operation (term) commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OperationCommands {
    /// Create an operation.
    Create {
        #[arg(long)]
        program: String,
        #[arg(long)]
        name: String,
        /// planned, active, completed
        #[arg(long, default_value = "planned")]
        status: String,
    },
    /// List operations.
    List {
        #[arg(long)]
        program: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Get an operation by ID.
    Get { id: String },
    /// Update an operation.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete an operation with its slots, courses, and routines.
    Delete { id: String },
}

/// Course commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CourseCommands {
    /// Create a course.
    Create {
        #[arg(long)]
        operation: String,
        #[arg(long)]
        name: String,
    },
    /// List courses.
    List {
        #[arg(long)]
        operation: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Get a course by ID.
    Get { id: String },
    /// Rename a course.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a course.
    Delete { id: String },
}

/// Student group commands.
#[derive(Clone, Debug, Subcommand)]
pub enum GroupCommands {
    /// Create a group.
    Create {
        #[arg(long)]
        program: String,
        #[arg(long)]
        name: String,
    },
    /// List groups.
    List {
        #[arg(long)]
        program: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Get a group by ID.
    Get { id: String },
    /// Rename a group.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a group, its subgroups, and their events.
    Delete { id: String },
}

/// Student subgroup commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SubgroupCommands {
    /// Create a subgroup.
    Create {
        #[arg(long)]
        group: String,
        #[arg(long)]
        name: String,
    },
    /// List subgroups.
    List {
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Get a subgroup by ID.
    Get { id: String },
    /// Rename a subgroup.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a subgroup and its events.
    Delete { id: String },
}
