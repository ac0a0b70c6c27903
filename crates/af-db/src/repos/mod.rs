//! Repository modules implementing store operations for all AcademyFlow
//! entities.
//!
//! Each module adds methods to `AcademyService` via `impl AcademyService`
//! blocks. Every query is scoped by the caller's `SessionContext`.

pub mod audience;
pub mod audit;
pub mod course;
pub mod department;
pub mod group;
pub mod institute;
pub mod operation;
pub mod program;
pub mod recurring_event;
pub mod routine;
pub mod slot;
pub mod subgroup;
pub mod timetable;
pub mod user;
pub mod vacation;
