//! Days, audience scopes, statuses, roles, and audit vocabulary for AcademyFlow.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the value stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DayOfWeek
// ---------------------------------------------------------------------------

/// Day a recurring event takes place on.
///
/// The canonical week ordering is Sunday..Saturday; it drives the grid row
/// of every timetable block.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    #[serde(alias = "Sunday")]
    Sunday,
    #[serde(alias = "Monday")]
    Monday,
    #[serde(alias = "Tuesday")]
    Tuesday,
    #[serde(alias = "Wednesday")]
    Wednesday,
    #[serde(alias = "Thursday")]
    Thursday,
    #[serde(alias = "Friday")]
    Friday,
    #[serde(alias = "Saturday")]
    Saturday,
}

impl DayOfWeek {
    /// Every day in canonical week order.
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Zero-based position in the canonical week (Sunday = 0).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }

    /// Capitalised label used for grid row headers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ScopeKind
// ---------------------------------------------------------------------------

/// Kind of audience a recurring event is assigned to.
///
/// Rows written by other clients may carry kinds this build does not know;
/// those deserialize to `Unknown` and take no part in timetable occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Group,
    Subgroup,
    #[serde(other)]
    Unknown,
}

impl ScopeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Subgroup => "subgroup",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OperationStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an operation (term).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Planned,
    Active,
    Completed,
}

impl OperationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VacationScope
// ---------------------------------------------------------------------------

/// What a vacation period applies to.
///
/// `All` targets the whole institute; the others target one department,
/// program, or operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VacationScope {
    All,
    Department,
    Program,
    Operation,
}

impl VacationScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Department => "department",
            Self::Program => "program",
            Self::Operation => "operation",
        }
    }
}

impl fmt::Display for VacationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role of a user within an institute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Moderator,
    Teacher,
    Observer,
    Student,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Teacher => "teacher",
            Self::Observer => "observer",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the system, used in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Institute,
    Department,
    Program,
    Operation,
    Course,
    Group,
    Subgroup,
    Slot,
    Routine,
    RecurringEvent,
    Vacation,
    User,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Institute => "institute",
            Self::Department => "department",
            Self::Program => "program",
            Self::Operation => "operation",
            Self::Course => "course",
            Self::Group => "group",
            Self::Subgroup => "subgroup",
            Self::Slot => "slot",
            Self::Routine => "routine",
            Self::RecurringEvent => "recurring_event",
            Self::Vacation => "vacation",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn week_order_starts_on_sunday() {
        assert_eq!(DayOfWeek::ALL[0], DayOfWeek::Sunday);
        for (idx, day) in DayOfWeek::ALL.iter().enumerate() {
            assert_eq!(day.index(), idx);
        }
    }

    #[test]
    fn day_accepts_capitalised_alias() {
        let day: DayOfWeek = serde_json::from_str("\"Monday\"").unwrap();
        assert_eq!(day, DayOfWeek::Monday);
        assert_eq!(serde_json::to_string(&day).unwrap(), "\"monday\"");
    }

    #[test]
    fn unknown_scope_kind_falls_back() {
        let kind: ScopeKind = serde_json::from_str("\"cohort\"").unwrap();
        assert_eq!(kind, ScopeKind::Unknown);
    }

    #[test]
    fn as_str_matches_serde() {
        for status in [
            OperationStatus::Planned,
            OperationStatus::Active,
            OperationStatus::Completed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        let json = serde_json::to_string(&EntityType::RecurringEvent).unwrap();
        assert_eq!(json, "\"recurring_event\"");
    }
}
