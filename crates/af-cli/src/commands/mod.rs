pub mod audit;
pub mod course;
pub mod department;
pub mod dispatch;
pub mod event;
pub mod group;
pub mod institute;
pub mod operation;
pub mod program;
pub mod routine;
pub mod shared;
pub mod slot;
pub mod subgroup;
pub mod user;
pub mod vacation;
