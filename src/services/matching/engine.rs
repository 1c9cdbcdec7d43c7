// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pass orchestration.
//!
//! A run is a fixed sequence of phases sharing one [`MatchLedger`]:
//! strict cross-gender, relaxed, strict same/unspecified, relaxed again.

use super::assign::{Assignment, MatchLedger, PassKind};
use super::candidate::{strict_candidates, Bucket, CandidatePools};
use super::relaxed::relaxed_candidates;
use super::roster::{Entrant, Roster};
use super::MatchingError;
use crate::models::{Match, MatchingReport};
use crate::services::meeting_code::MeetingCodes;

/// One step of a matching run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Assign one pool of the strict candidates
    Strict(Bucket),
    /// Regenerate relaxed candidates over the unmatched and assign
    /// cross-gender then same/unspecified
    Relaxed,
}

/// The phase table, executed in order.
pub const PHASES: [Phase; 4] = [
    Phase::Strict(Bucket::CrossGender),
    Phase::Relaxed,
    Phase::Strict(Bucket::SameOrUnspecified),
    Phase::Relaxed,
];

/// Result of a matching run.
#[derive(Debug, Clone)]
pub struct MatchingOutcome {
    pub assignments: Vec<Assignment>,
    pub report: MatchingReport,
}

impl MatchingOutcome {
    /// Match records ready to persist, in commit order.
    pub fn matches(&self) -> Vec<Match> {
        self.assignments.iter().map(|a| a.record.clone()).collect()
    }

    /// One-line summary for the administrator.
    pub fn summary(&self) -> String {
        self.report.to_string()
    }
}

fn unmatched<'a>(roster: &'a Roster, ledger: &MatchLedger) -> Vec<&'a Entrant> {
    roster
        .entrants()
        .iter()
        .filter(|entrant| !ledger.is_matched(entrant.user_id()))
        .collect()
}

/// Execute a single phase. Returns the number of matches it committed.
pub fn run_phase<'a>(
    phase: Phase,
    roster: &'a Roster,
    strict: &CandidatePools<'a>,
    ledger: &mut MatchLedger,
    codes: &mut dyn MeetingCodes,
) -> Result<usize, MatchingError> {
    match phase {
        Phase::Strict(bucket) => ledger.assign(strict.pool(bucket), PassKind::Strict, codes),
        Phase::Relaxed => {
            let remaining = unmatched(roster, ledger);
            if remaining.len() < 2 {
                return Ok(0);
            }

            let relaxed = relaxed_candidates(&remaining);
            let mut committed = 0;
            for bucket in [Bucket::CrossGender, Bucket::SameOrUnspecified] {
                committed += ledger.assign(relaxed.pool(bucket), PassKind::Relaxed, codes)?;
            }
            Ok(committed)
        }
    }
}

/// Pair everyone on the roster as far as possible.
///
/// Deterministic for a given roster order apart from the meeting codes.
pub fn pair_participants(
    roster: &Roster,
    codes: &mut dyn MeetingCodes,
) -> Result<MatchingOutcome, MatchingError> {
    let everyone: Vec<&Entrant> = roster.entrants().iter().collect();
    let strict = strict_candidates(&everyone);

    tracing::info!(
        eligible = roster.len(),
        strict_candidates = strict.len(),
        cross_gender = strict.cross_gender.len(),
        "Strict candidates generated"
    );

    let mut ledger = MatchLedger::new();
    for phase in PHASES {
        let committed = run_phase(phase, roster, &strict, &mut ledger, codes)?;
        tracing::info!(
            phase = ?phase,
            committed,
            matched = ledger.matched_count(),
            "Matching phase complete"
        );
    }

    let assignments = ledger.into_assignments();
    let matches_created = assignments.len();
    let fallback_matches = assignments
        .iter()
        .filter(|a| a.pass == PassKind::Relaxed)
        .count();

    let report = MatchingReport {
        eligible_users: roster.len() as u32,
        candidate_pairs: strict.len() as u32,
        cross_gender_candidates: strict.cross_gender.len() as u32,
        matches_created: matches_created as u32,
        fallback_matches: fallback_matches as u32,
        unmatched_users: (roster.len() - 2 * matches_created) as u32,
        skipped_slots: roster.skipped_slots(),
    };

    tracing::info!(summary = %report, "Matching run finished");

    Ok(MatchingOutcome {
        assignments,
        report,
    })
}
