mod academic;
mod event;
mod institute;
mod people;
mod routine;
mod slot;

pub use academic::{
    CourseCommands, DepartmentCommands, GroupCommands, OperationCommands, ProgramCommands,
    SubgroupCommands,
};
pub use event::{EventCommands, EventCreateArgs, EventUpdateArgs};
pub use institute::InstituteCommands;
pub use people::{UserCommands, VacationCommands};
pub use routine::RoutineCommands;
pub use slot::SlotCommands;
