//! Entity structs for all AcademyFlow domain objects.
//!
//! Each entity maps to a table in the libSQL store (see `af-db/migrations`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip
//! and schema validation.

mod audit;
mod course;
mod department;
mod group;
mod institute;
mod operation;
mod program;
mod recurring_event;
mod routine;
mod slot;
mod user;
mod vacation;

pub use audit::AuditEntry;
pub use course::Course;
pub use department::Department;
pub use group::{Group, Subgroup};
pub use institute::Institute;
pub use operation::Operation;
pub use program::Program;
pub use recurring_event::{AudienceScope, RecurringEvent};
pub use routine::Routine;
pub use slot::Slot;
pub use user::User;
pub use vacation::Vacation;
