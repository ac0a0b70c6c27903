//! Timetable error and warning types.

use af_core::enums::DayOfWeek;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors raised at the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    /// The selected subgroup has no group, or is not a child of the selected group.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// The cell already holds an event for the current view.
    #[error("Cell {slot_id} on {day} is covered by an existing event")]
    CellCovered { slot_id: String, day: DayOfWeek },

    /// The slot is not part of the term's catalog.
    #[error("Unknown slot: {0}")]
    UnknownSlot(String),
}

/// Data-integrity problems found while placing events. Never fatal: the
/// affected event is left out of both coverage and block emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    /// The event ends on a slot ordered before its start slot.
    InconsistentSpan {
        event_id: String,
        start_serial: i64,
        end_serial: i64,
    },
    /// The event references a slot missing from the catalog.
    MissingSlot { event_id: String, slot_id: String },
}

impl DataWarning {
    #[must_use]
    pub fn event_id(&self) -> &str {
        match self {
            Self::InconsistentSpan { event_id, .. } | Self::MissingSlot { event_id, .. } => {
                event_id
            }
        }
    }
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSpan {
                event_id,
                start_serial,
                end_serial,
            } => write!(
                f,
                "event {event_id} ends at serial {end_serial} before its start serial {start_serial}"
            ),
            Self::MissingSlot { event_id, slot_id } => {
                write!(f, "event {event_id} references unknown slot {slot_id}")
            }
        }
    }
}
