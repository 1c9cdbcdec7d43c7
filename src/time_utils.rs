// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Timelike, Utc};

/// Minutes in a day; the last representable meeting minute is one less.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Parse a wall-clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Minutes since midnight; seconds are dropped.
pub fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Inverse of [`minute_of_day`], clamped to the same day.
pub fn clock_at_minute(minute: i64) -> NaiveTime {
    let minute = minute.clamp(0, MINUTES_PER_DAY - 1);
    NaiveTime::from_hms_opt((minute / 60) as u32, (minute % 60) as u32, 0)
        .unwrap_or(NaiveTime::MIN)
}

/// Whole days between two dates, as minutes.
pub fn date_distance_minutes(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs() * MINUTES_PER_DAY
}

/// Serde adapter writing `NaiveTime` as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid clock time: {raw}")))
    }
}
