//! Slot update builder.

use chrono::NaiveTime;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SlotUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_no: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveTime>,
}

pub struct SlotUpdateBuilder(SlotUpdate);

impl SlotUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SlotUpdate::default())
    }

    #[must_use]
    pub fn serial_no(mut self, serial_no: i64) -> Self {
        self.0.serial_no = Some(serial_no);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn start(mut self, start: NaiveTime) -> Self {
        self.0.start = Some(start);
        self
    }

    #[must_use]
    pub fn end(mut self, end: NaiveTime) -> Self {
        self.0.end = Some(end);
        self
    }

    #[must_use]
    pub fn build(self) -> SlotUpdate {
        self.0
    }
}
