//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL. The update struct
//! is serialized as the audit `detail` payload (changed fields only).

pub mod course;
pub mod department;
pub mod event;
pub mod group;
pub mod operation;
pub mod program;
pub mod routine;
pub mod slot;
pub mod subgroup;
pub mod user;
pub mod vacation;
