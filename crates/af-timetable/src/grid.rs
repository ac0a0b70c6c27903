//! Day × slot grid built from a computed [`Timetable`].
//!
//! Pure mapping from engine output to screen coordinates: no scheduling
//! decisions are made here.

use af_core::enums::DayOfWeek;
use chrono::NaiveTime;
use serde::Serialize;

use crate::engine::{Block, DAY_LABEL_COLUMNS, HEADER_ROWS, Timetable};

/// Text of the top-left corner cell.
pub const CORNER_LABEL: &str = "Day / Slot";

/// Marker for an open cell in text output.
pub const OPEN_MARKER: &str = "+";

/// Marker for a cell covered by a block that started further left.
pub const CONTINUATION_MARKER: &str = "...";

/// One slot header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub column: usize,
    pub slot_id: String,
    pub title: String,
    pub time_range: String,
}

/// One cell of a day row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub slot_id: String,
    pub column: usize,
    pub covered: bool,
    /// Blocks whose first column is this cell.
    pub blocks: Vec<Block>,
}

impl GridCell {
    /// Uncovered cells accept new events.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !self.covered
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub day: DayOfWeek,
    pub row: usize,
    pub cells: Vec<GridCell>,
}

/// The whole grid: a header row, then one row per day Sunday..Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    pub corner: String,
    pub header: Vec<HeaderCell>,
    pub rows: Vec<GridRow>,
}

impl GridLayout {
    #[must_use]
    pub fn from_timetable(timetable: &Timetable) -> Self {
        let header = timetable
            .columns()
            .iter()
            .map(|col| HeaderCell {
                column: col.column,
                slot_id: col.slot_id.clone(),
                title: col.name.clone(),
                time_range: format!("{} - {}", format_clock(col.start), format_clock(col.end)),
            })
            .collect();

        let rows = DayOfWeek::ALL
            .iter()
            .map(|&day| {
                let row = day.index() + HEADER_ROWS;
                let cells = timetable
                    .columns()
                    .iter()
                    .map(|col| GridCell {
                        slot_id: col.slot_id.clone(),
                        column: col.column,
                        covered: timetable.is_covered(&col.slot_id, day),
                        blocks: timetable
                            .blocks()
                            .iter()
                            .filter(|b| b.row == row && b.col_start == col.column)
                            .cloned()
                            .collect(),
                    })
                    .collect();
                GridRow { day, row, cells }
            })
            .collect();

        Self {
            corner: CORNER_LABEL.to_string(),
            header,
            rows,
        }
    }

    /// Header line for text output.
    #[must_use]
    pub fn header_texts(&self) -> Vec<String> {
        std::iter::once(self.corner.clone())
            .chain(
                self.header
                    .iter()
                    .map(|h| format!("{} ({})", h.title, h.time_range)),
            )
            .collect()
    }

    /// Body lines for text output: day label then one entry per slot.
    ///
    /// A cell shows the labels of blocks starting there (shadow occupants in
    /// square brackets), a continuation marker when an earlier block covers
    /// it, or the open marker.
    #[must_use]
    pub fn row_texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut line = Vec::with_capacity(row.cells.len() + DAY_LABEL_COLUMNS);
                line.push(row.day.label().to_string());
                line.extend(row.cells.iter().map(cell_text));
                line
            })
            .collect()
    }
}

fn cell_text(cell: &GridCell) -> String {
    if !cell.blocks.is_empty() {
        return cell
            .blocks
            .iter()
            .map(|b| {
                if b.is_active {
                    b.label.text()
                } else {
                    format!("[{}]", b.label.text())
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");
    }
    if cell.covered {
        CONTINUATION_MARKER.to_string()
    } else {
        OPEN_MARKER.to_string()
    }
}

/// 12-hour clock with an AM/PM suffix, e.g. `9:05 AM`.
#[must_use]
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute;
    use crate::names::NameDirectory;
    use crate::selection::Selection;
    use af_core::entities::{AudienceScope, RecurringEvent, Slot};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slots() -> Vec<Slot> {
        [("s1", 1, t(9, 0), t(9, 50)), ("s2", 2, t(10, 0), t(10, 50)), ("s3", 3, t(13, 5), t(13, 55))]
            .into_iter()
            .map(|(id, serial, start, end)| Slot {
                id: id.into(),
                operation_id: "opr-1".into(),
                serial_no: serial,
                name: format!("P{serial}"),
                start,
                end,
                created_at: Utc::now(),
            })
            .collect()
    }

    fn monday_event(id: &str, scope: AudienceScope, start: &str, end: &str) -> RecurringEvent {
        RecurringEvent {
            id: id.into(),
            routine_id: "rtn-1".into(),
            institute_id: "ins-1".into(),
            title: "Lecture".into(),
            course_id: None,
            start_slot_id: start.into(),
            end_slot_id: end.into(),
            day_of_week: DayOfWeek::Monday,
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
    fn clock_uses_twelve_hour_format() {
        assert_eq!(format_clock(t(9, 5)), "9:05 AM");
        assert_eq!(format_clock(t(13, 55)), "1:55 PM");
        assert_eq!(format_clock(t(0, 0)), "12:00 AM");
        assert_eq!(format_clock(t(12, 30)), "12:30 PM");
    }

    #[test]
    fn header_lists_slots_in_serial_order() {
        let tt = compute(&slots(), &[], &Selection::none(), &NameDirectory::new());
        let grid = GridLayout::from_timetable(&tt);
        assert_eq!(
            grid.header_texts(),
            vec![
                "Day / Slot".to_string(),
                "P1 (9:00 AM - 9:50 AM)".to_string(),
                "P2 (10:00 AM - 10:50 AM)".to_string(),
                "P3 (1:05 PM - 1:55 PM)".to_string(),
            ]
        );
        assert_eq!(grid.rows.len(), 7);
        assert_eq!(grid.rows[0].day, DayOfWeek::Sunday);
        assert!(grid.rows.iter().flat_map(|r| &r.cells).all(GridCell::is_open));
    }

    #[test]
    fn active_block_renders_once_then_continues() {
        let events = [monday_event("e1", AudienceScope::group("g1"), "s1", "s2")];
        let tt = compute(
            &slots(),
            &events,
            &Selection::group("g1", ["sg1"]),
            &NameDirectory::new(),
        );
        let grid = GridLayout::from_timetable(&tt);
        let monday = &grid.row_texts()[DayOfWeek::Monday.index()];
        assert_eq!(monday, &vec!["Monday", "Lecture", "...", "+"]);
    }

    #[test]
    fn shadow_blocks_are_bracketed_per_slot() {
        let events = [monday_event("e1", AudienceScope::group("g1"), "s2", "s3")];
        let names = NameDirectory::new().with_group("g1", "Batch 21");
        let selection = Selection::subgroup("g1", "sg1", ["sg1"]).unwrap();
        let tt = compute(&slots(), &events, &selection, &names);
        let grid = GridLayout::from_timetable(&tt);
        let monday = &grid.row_texts()[DayOfWeek::Monday.index()];
        assert_eq!(monday, &vec!["Monday", "+", "[Batch 21]", "[Batch 21]"]);
    }
}
