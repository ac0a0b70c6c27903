//! Weekly grid output for `afl routine grid`.

use std::fmt::Write as _;

use af_core::entities::Routine;
use af_core::enums::DayOfWeek;
use af_timetable::{Block, DataWarning, GridLayout, Selection, SlotColumn, Timetable};
use serde::Serialize;

use super::table::{self, TableOptions};

/// Machine-readable grid: the computed placement without screen layout.
#[derive(Debug, Serialize)]
pub struct GridView<'a> {
    pub routine: &'a Routine,
    pub selection: &'a Selection,
    pub columns: &'a [SlotColumn],
    pub blocks: &'a [Block],
    pub covered: Vec<CoveredCell<'a>>,
    pub warnings: &'a [DataWarning],
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CoveredCell<'a> {
    pub day: DayOfWeek,
    pub slot_id: &'a str,
}

impl<'a> GridView<'a> {
    #[must_use]
    pub fn new(routine: &'a Routine, timetable: &'a Timetable) -> Self {
        Self {
            routine,
            selection: timetable.selection(),
            columns: timetable.columns(),
            blocks: timetable.blocks(),
            covered: timetable
                .covered_cells()
                .into_iter()
                .map(|(day, column)| CoveredCell {
                    day,
                    slot_id: column.slot_id.as_str(),
                })
                .collect(),
            warnings: timetable.warnings(),
        }
    }
}

/// Render the day × slot grid as an aligned text table, followed by one
/// line per data warning.
#[must_use]
pub fn render_grid_text(routine: &Routine, timetable: &Timetable, options: TableOptions) -> String {
    let layout = GridLayout::from_timetable(timetable);
    let mut out = format!("{}\n\n", routine.name);
    out.push_str(&table::render_entity_table(
        &layout.header_texts(),
        &layout.row_texts(),
        options,
    ));
    if timetable.selection().group_id().is_none() {
        out.push_str("\n\nno group selected: pass --group to see occupied cells");
    }
    for warning in timetable.warnings() {
        let _ = write!(out, "\nwarning: {warning}");
    }
    out
}

#[cfg(test)]
mod tests {
    use af_core::entities::{AudienceScope, RecurringEvent, Routine, Slot};
    use af_core::enums::DayOfWeek;
    use af_timetable::{NameDirectory, Selection, compute};
    use chrono::{NaiveTime, Utc};
    use pretty_assertions::assert_eq;

    use super::{CoveredCell, GridView, render_grid_text};
    use crate::output::table::TableOptions;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    fn routine() -> Routine {
        Routine {
            id: "rtn-1".into(),
            operation_id: "opr-1".into(),
            name: "Spring routine".into(),
            created_at: Utc::now(),
        }
    }

    fn slot(id: &str, serial: i64, hour: u32) -> Slot {
        Slot {
            id: id.into(),
            operation_id: "opr-1".into(),
            serial_no: serial,
            name: format!("P{serial}"),
            start: NaiveTime::from_hms_opt(hour, 0, 0).expect("time"),
            end: NaiveTime::from_hms_opt(hour, 50, 0).expect("time"),
            created_at: Utc::now(),
        }
    }

    fn event(id: &str, start: &str, end: &str, scope: AudienceScope) -> RecurringEvent {
        RecurringEvent {
            id: id.into(),
            routine_id: "rtn-1".into(),
            institute_id: "ins-1".into(),
            title: "Algorithms".into(),
            course_id: None,
            start_slot_id: start.into(),
            end_slot_id: end.into(),
            day_of_week: DayOfWeek::Tuesday,
            repeat_every: 1,
            start_week: 1,
            is_reschedulable: false,
            description: None,
            scope,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn text_grid_shows_block_and_continuation() {
        let slots = vec![slot("s1", 1, 9), slot("s2", 2, 10), slot("s3", 3, 11)];
        let events = vec![event("e1", "s1", "s2", AudienceScope::group("g1"))];
        let timetable = compute(
            &slots,
            &events,
            &Selection::group("g1", Vec::<String>::new()),
            &NameDirectory::new(),
        );

        let text = render_grid_text(&routine(), &timetable, PLAIN);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Spring routine");
        assert!(lines[2].starts_with("Day / Slot"));
        assert!(lines[2].contains("P1 (9:00 AM - 9:50 AM)"));

        let tuesday = lines
            .iter()
            .find(|line| line.starts_with("Tuesday"))
            .expect("tuesday row");
        let cells: Vec<&str> = tuesday.split("  ").filter(|c| !c.trim().is_empty()).collect();
        assert_eq!(
            cells.iter().map(|c| c.trim()).collect::<Vec<_>>(),
            vec!["Tuesday", "Algorithms", "...", "+"]
        );
        assert!(!text.contains("no group selected"));
    }

    #[test]
    fn text_grid_notes_missing_selection_and_warnings() {
        let slots = vec![slot("s1", 1, 9), slot("s2", 2, 10)];
        let events = vec![event("e1", "s2", "s1", AudienceScope::group("g1"))];

        let empty = compute(&slots, &events, &Selection::none(), &NameDirectory::new());
        assert!(render_grid_text(&routine(), &empty, PLAIN).contains("no group selected"));

        let selected = compute(
            &slots,
            &events,
            &Selection::group("g1", Vec::<String>::new()),
            &NameDirectory::new(),
        );
        let text = render_grid_text(&routine(), &selected, PLAIN);
        assert!(text.lines().any(|line| line.starts_with("warning: event e1")));
    }

    #[test]
    fn view_lists_covered_cells() {
        let slots = vec![slot("s1", 1, 9), slot("s2", 2, 10), slot("s3", 3, 11)];
        let events = vec![event("e1", "s2", "s3", AudienceScope::group("g1"))];
        let timetable = compute(
            &slots,
            &events,
            &Selection::group("g1", Vec::<String>::new()),
            &NameDirectory::new(),
        );
        let routine = routine();
        let view = GridView::new(&routine, &timetable);

        assert_eq!(
            view.covered,
            vec![
                CoveredCell {
                    day: DayOfWeek::Tuesday,
                    slot_id: "s2"
                },
                CoveredCell {
                    day: DayOfWeek::Tuesday,
                    slot_id: "s3"
                },
            ]
        );
        let json = serde_json::to_value(&view).expect("view serializes");
        assert_eq!(json["routine"]["id"], "rtn-1");
        assert_eq!(json["blocks"].as_array().map(Vec::len), Some(1));
    }
}
