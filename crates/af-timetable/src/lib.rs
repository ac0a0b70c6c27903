//! # af-timetable
//!
//! Occupancy and overlay engine for routine timetables.
//!
//! Given a term's slot catalog, every recurring event of a routine, and the
//! audience the viewer has selected, [`compute`] decides:
//! - which (slot, day) cells are covered for the current view,
//! - which events are *active* (exact audience, rendered in full) and which
//!   are *shadow* occupants (parent group or sibling subgroup, rendered as a
//!   muted marker per slot),
//! - where every block sits on the day × slot grid.
//!
//! The engine is a pure function of its inputs: no I/O, no caching, no hidden
//! state. [`grid::GridLayout`] maps its output onto screen cells.

pub mod engine;
pub mod error;
pub mod grid;
pub mod names;
pub mod selection;

pub use engine::{
    Block, BlockLabel, CellTarget, DAY_LABEL_COLUMNS, HEADER_ROWS, SlotColumn, Timetable, compute,
};
pub use error::{DataWarning, TimetableError};
pub use grid::{GridCell, GridLayout, GridRow, HeaderCell};
pub use names::{NameDirectory, NameLookup};
pub use selection::Selection;
