use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    CourseCommands, DepartmentCommands, EventCommands, GroupCommands, InstituteCommands,
    OperationCommands, ProgramCommands, RoutineCommands, SlotCommands, SubgroupCommands,
    UserCommands, VacationCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Institutes.
    Institute {
        #[command(subcommand)]
        action: InstituteCommands,
    },
    /// Departments.
    Department {
        #[command(subcommand)]
        action: DepartmentCommands,
    },
    /// Degree programs.
    Program {
        #[command(subcommand)]
        action: ProgramCommands,
    },
    /// Operations (academic terms).
    Operation {
        #[command(subcommand)]
        action: OperationCommands,
    },
    /// Courses of a term.
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },
    /// Student groups.
    Group {
        #[command(subcommand)]
        action: GroupCommands,
    },
    /// Student subgroups.
    Subgroup {
        #[command(subcommand)]
        action: SubgroupCommands,
    },
    /// Time slots of a term.
    Slot {
        #[command(subcommand)]
        action: SlotCommands,
    },
    /// Weekly routines and their timetable grid.
    Routine {
        #[command(subcommand)]
        action: RoutineCommands,
    },
    /// Recurring events.
    Event {
        #[command(subcommand)]
        action: EventCommands,
    },
    /// Vacations.
    Vacation {
        #[command(subcommand)]
        action: VacationCommands,
    },
    /// Users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// View audit trail.
    Audit(AuditArgs),
}

/// Arguments for `afl audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
    #[arg(long)]
    pub actor: Option<String>,
}
