//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing and handle the dual datetime
//! format (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::DatabaseError;

/// Storage format for slot times. Fixed width so that text comparison in
/// SQL orders times correctly.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Storage format for calendar days.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a time of day stored as `HH:MM:SS`, also accepting `HH:MM`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if neither format matches.
pub fn parse_time(s: &str) -> Result<NaiveTime, DatabaseError> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse time '{s}': {e}")))
}

/// Parse a calendar day stored as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` on a malformed date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all af-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER 0/1 column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Read an INTEGER column as `u32`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the stored value is negative or too large.
pub fn get_u32(row: &libsql::Row, idx: i32) -> Result<u32, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u32::try_from(raw)
        .map_err(|_| DatabaseError::Query(format!("column {idx} out of range: {raw}")))
}

/// Extract an optional JSON value from a TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string contains invalid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}

/// Serialize an update payload for the audit trail.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_detail<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DatabaseError> {
    serde_json::to_value(value).map_err(|e| DatabaseError::Other(e.into()))
}

/// `%query%` pattern for a case-insensitive `LIKE` name search.
#[must_use]
pub fn like_pattern(query: &str) -> String {
    format!("%{}%", query.trim())
}

/// Collects `column = ?N` assignments for a dynamic `UPDATE`.
///
/// Only the fields present in an update builder produce assignments.
#[derive(Debug, Default)]
pub struct SetClause {
    sets: Vec<String>,
    params: Vec<libsql::Value>,
}

impl SetClause {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: &str, value: impl Into<libsql::Value>) {
        self.params.push(value.into());
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    /// Push a nullable value; `None` writes SQL NULL.
    pub fn push_opt(&mut self, column: &str, value: Option<String>) {
        self.push(column, value.map_or(libsql::Value::Null, libsql::Value::Text));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Build `UPDATE {table} SET … WHERE id = ? AND institute_id = ?`.
    #[must_use]
    pub fn into_sql(
        mut self,
        table: &str,
        id: &str,
        institute_id: &str,
    ) -> (String, Vec<libsql::Value>) {
        self.params.push(id.into());
        let id_idx = self.params.len();
        self.params.push(institute_id.into());
        let ins_idx = self.params.len();
        let sql = format!(
            "UPDATE {table} SET {} WHERE id = ?{id_idx} AND institute_id = ?{ins_idx}",
            self.sets.join(", ")
        );
        (sql, self.params)
    }
}
