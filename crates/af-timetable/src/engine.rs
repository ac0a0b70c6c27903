//! Occupancy computation and block placement.
//!
//! [`compute`] runs in four passes over its inputs:
//! 1. keep the *occupying* events, whose cells are covered in this view;
//! 2. split them into *active* events (exact audience) and shadow occupants;
//! 3. index the covered serial ranges per day;
//! 4. place one spanning block per active event and one single-cell block
//!    per slot of every shadow occupant.
//!
//! Spans are always read by slot serial order. A column is a position in the
//! serial-sorted catalog, so serial gaps never produce empty columns.

use std::collections::HashMap;
use std::ops::Range;

use af_core::entities::{AudienceScope, RecurringEvent, Slot};
use af_core::enums::DayOfWeek;
use chrono::NaiveTime;
use serde::Serialize;

use crate::error::{DataWarning, TimetableError};
use crate::names::NameLookup;
use crate::selection::Selection;

/// Grid columns before the first slot column (the day label column).
pub const DAY_LABEL_COLUMNS: usize = 1;

/// Grid rows before the first day row (the slot header row).
pub const HEADER_ROWS: usize = 1;

/// One slot of the catalog with its resolved grid column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotColumn {
    pub slot_id: String,
    pub serial_no: i64,
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub column: usize,
}

/// What a block shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockLabel {
    /// Full text of an active event.
    Event {
        course_name: Option<String>,
        title: String,
        description: Option<String>,
    },
    /// Name of the audience a shadow occupant belongs to.
    Audience { name: String },
}

impl BlockLabel {
    /// Single-line rendering.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Event {
                course_name,
                title,
                description,
            } => {
                let mut text = course_name
                    .as_ref()
                    .map_or_else(|| title.clone(), |course| format!("{course}: {title}"));
                if let Some(description) = description.as_deref().filter(|d| !d.is_empty()) {
                    text.push_str(" (");
                    text.push_str(description);
                    text.push(')');
                }
                text
            }
            Self::Audience { name } => name.clone(),
        }
    }
}

/// A renderable unit placed on the day × slot grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub event_id: String,
    pub day: DayOfWeek,
    pub col_start: usize,
    pub col_span: usize,
    pub row: usize,
    pub is_active: bool,
    pub label: BlockLabel,
}

/// An open cell, ready to receive a new event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellTarget {
    pub slot_id: String,
    pub day: DayOfWeek,
    /// Audience a new event created here belongs to. `None` when no group is
    /// selected.
    pub scope: Option<AudienceScope>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Catalog {
    columns: Vec<SlotColumn>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    fn new(slots: &[Slot]) -> Self {
        let mut ordered: Vec<&Slot> = slots.iter().collect();
        ordered.sort_by_key(|slot| slot.serial_no);

        let columns: Vec<SlotColumn> = ordered
            .into_iter()
            .enumerate()
            .map(|(pos, slot)| SlotColumn {
                slot_id: slot.id.clone(),
                serial_no: slot.serial_no,
                name: slot.name.clone(),
                start: slot.start,
                end: slot.end,
                column: pos + DAY_LABEL_COLUMNS,
            })
            .collect();
        let by_id = columns
            .iter()
            .enumerate()
            .map(|(pos, col)| (col.slot_id.clone(), pos))
            .collect();
        Self { columns, by_id }
    }

    fn get(&self, slot_id: &str) -> Option<&SlotColumn> {
        self.by_id.get(slot_id).map(|&pos| &self.columns[pos])
    }

    /// Catalog positions whose serial falls in `[start, end]`.
    fn positions_within(&self, start: i64, end: i64) -> Range<usize> {
        let lo = self.columns.partition_point(|col| col.serial_no < start);
        let hi = self.columns.partition_point(|col| col.serial_no <= end);
        debug_assert!(lo <= hi, "span resolved with end before start");
        lo..hi
    }
}

// ---------------------------------------------------------------------------
// Coverage index
// ---------------------------------------------------------------------------

/// Sorted, coalesced inclusive serial ranges, one list per day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CoverageIndex {
    by_day: [Vec<(i64, i64)>; 7],
}

impl CoverageIndex {
    fn from_spans(mut spans: [Vec<(i64, i64)>; 7]) -> Self {
        for day in &mut spans {
            day.sort_unstable();
            let mut merged: Vec<(i64, i64)> = Vec::with_capacity(day.len());
            for &(start, end) in day.iter() {
                match merged.last_mut() {
                    Some(last) if start <= last.1.saturating_add(1) => {
                        last.1 = last.1.max(end);
                    }
                    _ => merged.push((start, end)),
                }
            }
            *day = merged;
        }
        Self { by_day: spans }
    }

    fn covers(&self, day: DayOfWeek, serial: i64) -> bool {
        let spans = &self.by_day[day.index()];
        let idx = spans.partition_point(|&(_, end)| end < serial);
        spans.get(idx).is_some_and(|&(start, _)| start <= serial)
    }
}

// ---------------------------------------------------------------------------
// Timetable
// ---------------------------------------------------------------------------

/// Output of [`compute`]: placed blocks plus the coverage predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    catalog: Catalog,
    blocks: Vec<Block>,
    coverage: CoverageIndex,
    warnings: Vec<DataWarning>,
    selection: Selection,
}

impl Timetable {
    /// Slot columns in serial order.
    #[must_use]
    pub fn columns(&self) -> &[SlotColumn] {
        &self.catalog.columns
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn active_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_active)
    }

    #[must_use]
    pub fn warnings(&self) -> &[DataWarning] {
        &self.warnings
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether `(slot_id, day)` holds an occupying event. Unknown slots are
    /// never covered.
    #[must_use]
    pub fn is_covered(&self, slot_id: &str, day: DayOfWeek) -> bool {
        self.catalog
            .get(slot_id)
            .is_some_and(|col| self.coverage.covers(day, col.serial_no))
    }

    /// Every covered cell, by day then column.
    #[must_use]
    pub fn covered_cells(&self) -> Vec<(DayOfWeek, &SlotColumn)> {
        DayOfWeek::ALL
            .iter()
            .flat_map(|&day| {
                self.catalog
                    .columns
                    .iter()
                    .filter(move |col| self.coverage.covers(day, col.serial_no))
                    .map(move |col| (day, col))
            })
            .collect()
    }

    /// Resolve a click on `(slot_id, day)` into an event-creation target.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::UnknownSlot`] if the slot is not in the
    /// catalog, or [`TimetableError::CellCovered`] if the cell is occupied.
    pub fn open_cell(&self, slot_id: &str, day: DayOfWeek) -> Result<CellTarget, TimetableError> {
        let col = self
            .catalog
            .get(slot_id)
            .ok_or_else(|| TimetableError::UnknownSlot(slot_id.to_string()))?;
        if self.coverage.covers(day, col.serial_no) {
            return Err(TimetableError::CellCovered {
                slot_id: slot_id.to_string(),
                day,
            });
        }
        Ok(CellTarget {
            slot_id: col.slot_id.clone(),
            day,
            scope: self.selection.exact_scope(),
        })
    }

    /// Slots a new event starting at `start_slot_id` may end on: the start
    /// slot itself and every later serial.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::UnknownSlot`] if the start slot is not in
    /// the catalog.
    pub fn end_slot_options(&self, start_slot_id: &str) -> Result<&[SlotColumn], TimetableError> {
        let start = self
            .catalog
            .by_id
            .get(start_slot_id)
            .copied()
            .ok_or_else(|| TimetableError::UnknownSlot(start_slot_id.to_string()))?;
        Ok(&self.catalog.columns[start..])
    }
}

// ---------------------------------------------------------------------------
// compute
// ---------------------------------------------------------------------------

/// Compute coverage and block placement for `selection`.
///
/// `slots` is the term's catalog and `events` every event of the routine,
/// unfiltered. Events whose span cannot be resolved are skipped and reported
/// through [`Timetable::warnings`].
#[must_use]
pub fn compute<N>(
    slots: &[Slot],
    events: &[RecurringEvent],
    selection: &Selection,
    names: &N,
) -> Timetable
where
    N: NameLookup + ?Sized,
{
    let catalog = Catalog::new(slots);
    let mut blocks = Vec::new();
    let mut warnings = Vec::new();
    let mut spans: [Vec<(i64, i64)>; 7] = Default::default();

    for event in events.iter().filter(|e| selection.occupies(&e.scope)) {
        let (start, end) = match resolve_span(&catalog, event) {
            Ok(span) => span,
            Err(warning) => {
                warnings.push(warning);
                continue;
            }
        };
        spans[event.day_of_week.index()].push((start, end));

        let positions = catalog.positions_within(start, end);
        let row = event.day_of_week.index() + HEADER_ROWS;

        if selection.describes(&event.scope) {
            blocks.push(Block {
                event_id: event.id.clone(),
                day: event.day_of_week,
                col_start: positions.start + DAY_LABEL_COLUMNS,
                col_span: positions.len(),
                row,
                is_active: true,
                label: BlockLabel::Event {
                    course_name: event
                        .course_id
                        .as_deref()
                        .and_then(|id| names.course_name(id))
                        .map(str::to_owned),
                    title: event.title.clone(),
                    description: event.description.clone(),
                },
            });
        } else {
            let name = names
                .audience_name(&event.scope)
                .map_or_else(|| event.scope.id.clone(), str::to_owned);
            blocks.extend(positions.map(|pos| Block {
                event_id: event.id.clone(),
                day: event.day_of_week,
                col_start: pos + DAY_LABEL_COLUMNS,
                col_span: 1,
                row,
                is_active: false,
                label: BlockLabel::Audience { name: name.clone() },
            }));
        }
    }

    Timetable {
        catalog,
        blocks,
        coverage: CoverageIndex::from_spans(spans),
        warnings,
        selection: selection.clone(),
    }
}

fn resolve_span(catalog: &Catalog, event: &RecurringEvent) -> Result<(i64, i64), DataWarning> {
    let missing = |slot_id: &str| DataWarning::MissingSlot {
        event_id: event.id.clone(),
        slot_id: slot_id.to_string(),
    };
    let start = catalog
        .get(&event.start_slot_id)
        .ok_or_else(|| missing(&event.start_slot_id))?
        .serial_no;
    let end = catalog
        .get(&event.end_slot_id)
        .ok_or_else(|| missing(&event.end_slot_id))?
        .serial_no;
    if end < start {
        return Err(DataWarning::InconsistentSpan {
            event_id: event.id.clone(),
            start_serial: start,
            end_serial: end,
        });
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NameDirectory;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn slot(id: &str, serial: i64) -> Slot {
        Slot {
            id: id.into(),
            operation_id: "opr-1".into(),
            serial_no: serial,
            name: format!("Period {serial}"),
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(8, 50, 0).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn event(id: &str, scope: AudienceScope, day: DayOfWeek, start: &str, end: &str) -> RecurringEvent {
        RecurringEvent {
            id: id.into(),
            routine_id: "rtn-1".into(),
            institute_id: "ins-1".into(),
            title: format!("{id} title"),
            course_id: None,
            start_slot_id: start.into(),
            end_slot_id: end.into(),
            day_of_week: day,
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
    fn coverage_index_merges_overlapping_spans() {
        let mut spans: [Vec<(i64, i64)>; 7] = Default::default();
        spans[1] = vec![(4, 5), (1, 2), (2, 4)];
        let index = CoverageIndex::from_spans(spans);
        assert_eq!(index.by_day[1], vec![(1, 5)]);
        assert!(index.covers(DayOfWeek::Monday, 1));
        assert!(index.covers(DayOfWeek::Monday, 5));
        assert!(!index.covers(DayOfWeek::Monday, 6));
        assert!(!index.covers(DayOfWeek::Monday, 0));
        assert!(!index.covers(DayOfWeek::Tuesday, 2));
    }

    #[test]
    fn coverage_index_keeps_disjoint_spans_apart() {
        let mut spans: [Vec<(i64, i64)>; 7] = Default::default();
        spans[0] = vec![(5, 5), (1, 1)];
        let index = CoverageIndex::from_spans(spans);
        assert_eq!(index.by_day[0], vec![(1, 1), (5, 5)]);
        assert!(index.covers(DayOfWeek::Sunday, 1));
        assert!(!index.covers(DayOfWeek::Sunday, 3));
        assert!(index.covers(DayOfWeek::Sunday, 5));
    }

    #[test]
    fn coverage_index_joins_adjacent_spans() {
        let mut spans: [Vec<(i64, i64)>; 7] = Default::default();
        spans[2] = vec![(3, 4), (1, 2)];
        let index = CoverageIndex::from_spans(spans);
        assert_eq!(index.by_day[2], vec![(1, 4)]);
    }

    #[test]
    fn coverage_index_handles_extreme_serials() {
        let mut spans: [Vec<(i64, i64)>; 7] = Default::default();
        spans[3] = vec![(i64::MAX, i64::MAX), (i64::MIN, i64::MIN), (i64::MAX - 1, i64::MAX)];
        let index = CoverageIndex::from_spans(spans);
        assert_eq!(
            index.by_day[3],
            vec![(i64::MIN, i64::MIN), (i64::MAX - 1, i64::MAX)]
        );
        assert!(index.covers(DayOfWeek::Wednesday, i64::MAX));
        assert!(index.covers(DayOfWeek::Wednesday, i64::MIN));
        assert!(!index.covers(DayOfWeek::Wednesday, 0));
        assert!(!index.covers(DayOfWeek::Wednesday, i64::MIN + 1));
    }

    #[test]
    fn catalog_sorts_by_serial() {
        let catalog = Catalog::new(&[slot("b", 2), slot("a", 1), slot("c", 5)]);
        let ids: Vec<_> = catalog.columns.iter().map(|c| c.slot_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(catalog.get("c").unwrap().column, 3);
        assert_eq!(catalog.positions_within(2, 5), 1..3);
        assert_eq!(catalog.positions_within(3, 4), 2..2);
    }

    #[test]
    fn serial_gaps_do_not_stretch_blocks() {
        let slots = [slot("s1", 10), slot("s2", 20), slot("s3", 30)];
        let events = [event("e1", AudienceScope::group("g1"), DayOfWeek::Monday, "s1", "s3")];
        let tt = compute(
            &slots,
            &events,
            &Selection::group("g1", Vec::<String>::new()),
            &NameDirectory::new(),
        );
        assert_eq!(tt.blocks()[0].col_start, 1);
        assert_eq!(tt.blocks()[0].col_span, 3);
        assert!(tt.is_covered("s2", DayOfWeek::Monday));
    }

    #[test]
    fn unknown_slot_is_not_covered() {
        let slots = [slot("s1", 1)];
        let events = [event("e1", AudienceScope::group("g1"), DayOfWeek::Monday, "s1", "s1")];
        let tt = compute(
            &slots,
            &events,
            &Selection::group("g1", Vec::<String>::new()),
            &NameDirectory::new(),
        );
        assert!(!tt.is_covered("nope", DayOfWeek::Monday));
        assert_eq!(
            tt.open_cell("nope", DayOfWeek::Monday),
            Err(TimetableError::UnknownSlot("nope".into()))
        );
    }

    #[test]
    fn label_text_joins_course_title_and_description() {
        let label = BlockLabel::Event {
            course_name: Some("Physics".into()),
            title: "Lecture".into(),
            description: Some("Room 4".into()),
        };
        assert_eq!(label.text(), "Physics: Lecture (Room 4)");
        let bare = BlockLabel::Event {
            course_name: None,
            title: "Lab".into(),
            description: Some(String::new()),
        };
        assert_eq!(bare.text(), "Lab");
    }
}
