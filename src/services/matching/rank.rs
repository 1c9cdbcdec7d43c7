// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Candidate ordering.
//!
//! Pairs involving a participant with few options go first so the greedy
//! assigner does not strand them; ties fall back to score, then overlap.

use super::candidate::Candidate;
use std::collections::HashMap;

/// How many candidates in the pool each participant appears in.
pub fn participant_counts<'a>(pool: &[Candidate<'a>]) -> HashMap<&'a str, usize> {
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for candidate in pool {
        *counts.entry(candidate.a.participant.user_id.as_str()).or_default() += 1;
        *counts.entry(candidate.b.participant.user_id.as_str()).or_default() += 1;
    }
    counts
}

/// Sort a pool in place: scarcest participant first, then score
/// descending, then overlap descending. Equal keys keep input order.
pub fn rank_candidates(pool: &mut [Candidate<'_>]) {
    let counts = participant_counts(pool);
    let scarcity = |candidate: &Candidate<'_>| {
        let a = counts.get(candidate.a.user_id()).copied().unwrap_or(0);
        let b = counts.get(candidate.b.user_id()).copied().unwrap_or(0);
        a.min(b)
    };

    pool.sort_by(|x, y| {
        scarcity(x)
            .cmp(&scarcity(y))
            .then_with(|| y.score.total_cmp(&x.score))
            .then_with(|| y.overlap_minutes.cmp(&x.overlap_minutes))
    });
}
