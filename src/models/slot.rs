// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Availability slot model.

use crate::time_utils::{minute_of_day, parse_clock, parse_iso_date};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Availability document as written by the availability flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRecord {
    pub user_id: String,
    /// ISO date (YYYY-MM-DD)
    pub slot_date: String,
    /// HH:MM or HH:MM:SS
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub campus: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A validated meeting window for one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySlot {
    pub user_id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub campus: Option<String>,
    pub location: Option<String>,
}

impl AvailabilitySlot {
    pub fn start_minute(&self) -> i64 {
        minute_of_day(self.start)
    }

    pub fn end_minute(&self) -> i64 {
        minute_of_day(self.end)
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end_minute() - self.start_minute()
    }
}

/// Reasons a stored slot is rejected before matching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("Invalid slot date: {0}")]
    InvalidDate(String),

    #[error("Invalid slot time: {0}")]
    InvalidTime(String),

    #[error("Slot ends at {end} but starts at {start}")]
    EmptyWindow { start: String, end: String },
}

impl TryFrom<&SlotRecord> for AvailabilitySlot {
    type Error = SlotError;

    fn try_from(record: &SlotRecord) -> Result<Self, Self::Error> {
        let date = parse_iso_date(&record.slot_date)
            .ok_or_else(|| SlotError::InvalidDate(record.slot_date.clone()))?;
        let start = parse_clock(&record.start_time)
            .ok_or_else(|| SlotError::InvalidTime(record.start_time.clone()))?;
        let end = parse_clock(&record.end_time)
            .ok_or_else(|| SlotError::InvalidTime(record.end_time.clone()))?;

        // Compared at minute precision, the same way overlaps are measured.
        if minute_of_day(end) <= minute_of_day(start) {
            return Err(SlotError::EmptyWindow {
                start: record.start_time.clone(),
                end: record.end_time.clone(),
            });
        }

        Ok(Self {
            user_id: record.user_id.clone(),
            date,
            start,
            end,
            campus: non_blank(record.campus.as_deref()),
            location: non_blank(record.location.as_deref()),
        })
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
