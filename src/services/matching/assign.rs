// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Greedy assignment against a run-wide ledger.

use super::candidate::Candidate;
use super::MatchingError;
use crate::models::{Match, MatchStatus};
use crate::services::meeting_code::MeetingCodes;
use serde::Serialize;
use std::collections::HashSet;

/// Which kind of pass committed a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassKind {
    Strict,
    Relaxed,
}

/// A committed match plus how it was found.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub record: Match,
    pub pass: PassKind,
    pub score: f64,
    pub overlap_minutes: i64,
}

/// Everyone matched so far in this run, and the matches themselves.
///
/// One ledger is threaded through every phase; a participant recorded
/// here is skipped by all later phases.
#[derive(Debug, Default)]
pub struct MatchLedger {
    matched: HashSet<String>,
    assignments: Vec<Assignment>,
}

impl MatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_matched(&self, user_id: &str) -> bool {
        self.matched.contains(user_id)
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }

    /// Walk a ranked pool once, committing every pair whose participants
    /// are both still free. Returns how many matches were committed.
    pub fn assign(
        &mut self,
        ranked: &[Candidate<'_>],
        pass: PassKind,
        codes: &mut dyn MeetingCodes,
    ) -> Result<usize, MatchingError> {
        let before = self.assignments.len();

        for candidate in ranked {
            let (a, b) = (candidate.a.user_id(), candidate.b.user_id());
            if self.is_matched(a) || self.is_matched(b) {
                continue;
            }

            let record = Match {
                user_a: a.to_string(),
                user_b: b.to_string(),
                meeting_date: candidate.slot.date,
                meeting_start: candidate.slot.start,
                meeting_end: candidate.slot.end,
                meeting_location: candidate.slot.location.clone(),
                meeting_code: codes.next_code()?,
                status: MatchStatus::Pending,
            };

            tracing::debug!(
                user_a = a,
                user_b = b,
                pass = ?pass,
                score = candidate.score,
                code = %record.meeting_code,
                "Committed match"
            );

            self.matched.insert(a.to_string());
            self.matched.insert(b.to_string());
            self.assignments.push(Assignment {
                record,
                pass,
                score: candidate.score,
                overlap_minutes: candidate.overlap_minutes,
            });
        }

        Ok(self.assignments.len() - before)
    }
}
