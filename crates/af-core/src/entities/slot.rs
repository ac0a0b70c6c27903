use chrono::{DateTime, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named time interval of a term.
///
/// `serial_no` is unique within the operation and is the only ordering key
/// used for event spans; the clock times are display data.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Slot {
    pub id: String,
    pub operation_id: String,
    pub serial_no: i64,
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub created_at: DateTime<Utc>,
}
