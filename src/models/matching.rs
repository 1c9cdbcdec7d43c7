// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Match records produced by a matching run.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Lifecycle state of a match. New matches always start as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Pending,
}

/// One committed pairing, stored in the `matches` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Match {
    pub user_a: String,
    pub user_b: String,
    pub meeting_date: NaiveDate,
    #[serde(with = "crate::time_utils::hhmm")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub meeting_start: NaiveTime,
    #[serde(with = "crate::time_utils::hhmm")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub meeting_end: NaiveTime,
    pub meeting_location: Option<String>,
    pub meeting_code: String,
    pub status: MatchStatus,
}

impl Match {
    /// True if the given user is one side of this match.
    pub fn involves(&self, user_id: &str) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }
}

/// Counters describing one matching run.
///
/// `Display` renders the one-line summary shown to the administrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MatchingReport {
    pub eligible_users: u32,
    /// Strict-pass candidate pairs across both pools
    pub candidate_pairs: u32,
    pub cross_gender_candidates: u32,
    pub matches_created: u32,
    /// Matches that came from a relaxed pass
    pub fallback_matches: u32,
    pub unmatched_users: u32,
    /// Malformed or duplicate slots ignored while building the roster
    pub skipped_slots: u32,
}

impl fmt::Display for MatchingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.eligible_users == 0 {
            return write!(
                f,
                "No eligible users (completed, active profile with at least one availability slot); 0 matches created."
            );
        }

        write!(
            f,
            "{} eligible users, {} candidate pairs found ({} cross-gender), {} matches created ({} via fallback), {} users left unmatched.",
            self.eligible_users,
            self.candidate_pairs,
            self.cross_gender_candidates,
            self.matches_created,
            self.fallback_matches,
            self.unmatched_users,
        )
    }
}
