// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Relaxed fallback generator.
//!
//! Used for whoever is still unmatched. Any two slots can host a meeting;
//! windows that actually overlap are preferred, then windows close in time
//! of day, then windows close in date.

use super::candidate::{Bucket, Candidate, CandidatePools, MeetingSlot};
use super::location::{resolve_location, SiteMatch, MANUAL_COORDINATION};
use super::roster::Entrant;
use super::score::{date_penalty, relaxed_score, relaxed_time_score, Affinity};
use crate::models::AvailabilitySlot;
use crate::time_utils::{clock_at_minute, date_distance_minutes, MINUTES_PER_DAY};
use std::cmp::Reverse;

/// Meeting length when the two windows do not overlap.
pub const DEFAULT_FALLBACK_MEETING_MINUTES: i64 = 30;
/// Never propose a fallback meeting shorter than this.
pub const MIN_FALLBACK_MEETING_MINUTES: i64 = 15;

/// How close two slots are to each other.
#[derive(Debug, Clone)]
struct Proximity<'s> {
    a: &'s AvailabilitySlot,
    b: &'s AvailabilitySlot,
    /// Same-day intersection, 0 if none
    overlap_minutes: i64,
    /// Time-of-day distance between the windows, 0 if they touch or overlap
    gap_minutes: i64,
    date_diff_minutes: i64,
}

impl<'s> Proximity<'s> {
    fn between(a: &'s AvailabilitySlot, b: &'s AvailabilitySlot) -> Self {
        let latest_start = a.start_minute().max(b.start_minute());
        let earliest_end = a.end_minute().min(b.end_minute());

        let overlap_minutes = if a.date == b.date {
            (earliest_end - latest_start).max(0)
        } else {
            0
        };
        let gap_minutes = if overlap_minutes > 0 {
            0
        } else {
            (latest_start - earliest_end).max(0)
        };

        Self {
            a,
            b,
            overlap_minutes,
            gap_minutes,
            date_diff_minutes: date_distance_minutes(a.date, b.date),
        }
    }

    /// Smaller is better: real overlap, then smaller gap, then closer dates.
    fn preference(&self) -> (Reverse<bool>, i64, i64) {
        (
            Reverse(self.overlap_minutes > 0),
            self.gap_minutes,
            self.date_diff_minutes,
        )
    }

    fn meeting_slot(&self, site: SiteMatch) -> MeetingSlot {
        let (date, start_minute, end_minute) = if self.overlap_minutes > 0 {
            (
                self.a.date,
                self.a.start_minute().max(self.b.start_minute()),
                self.a.end_minute().min(self.b.end_minute()),
            )
        } else {
            let anchor = if self.a.start_minute() >= self.b.start_minute() {
                self.a
            } else {
                self.b
            };
            let length = anchor.duration_minutes().clamp(
                MIN_FALLBACK_MEETING_MINUTES,
                DEFAULT_FALLBACK_MEETING_MINUTES,
            );
            // Shift back so the meeting keeps its length before midnight.
            let start = anchor.start_minute().min(MINUTES_PER_DAY - 1 - length);
            (self.a.date.min(self.b.date), start, start + length)
        };

        MeetingSlot {
            date,
            start: clock_at_minute(start_minute),
            end: clock_at_minute(end_minute),
            location: Some(
                resolve_location(self.a, self.b, site)
                    .unwrap_or_else(|| MANUAL_COORDINATION.to_string()),
            ),
            location_match: site.location,
        }
    }
}

fn closest_slots<'s>(
    a_slots: &'s [AvailabilitySlot],
    b_slots: &'s [AvailabilitySlot],
) -> Option<Proximity<'s>> {
    a_slots
        .iter()
        .flat_map(|a| b_slots.iter().map(move |b| Proximity::between(a, b)))
        .min_by_key(Proximity::preference)
}

/// Evaluate one pair for the relaxed pass.
pub fn relaxed_candidate<'a>(a: &'a Entrant, b: &'a Entrant) -> Option<Candidate<'a>> {
    let closest = closest_slots(&a.slots, &b.slots)?;
    let site = SiteMatch::between(closest.a, closest.b);
    let affinity = Affinity::between(&a.participant, &b.participant);
    let time_score = relaxed_time_score(closest.overlap_minutes, closest.gap_minutes);

    Some(Candidate {
        a,
        b,
        score: relaxed_score(
            affinity,
            time_score,
            site,
            date_penalty(closest.date_diff_minutes),
        ),
        overlap_minutes: closest.overlap_minutes,
        campus_match: site.campus,
        location_match: site.location,
        bucket: Bucket::of(&a.participant, &b.participant),
        slot: closest.meeting_slot(site),
    })
}

/// Relaxed candidates among the given (unmatched) entrants, ranked.
pub fn relaxed_candidates<'a>(entrants: &[&'a Entrant]) -> CandidatePools<'a> {
    let mut pools = CandidatePools::default();
    if entrants.len() < 2 {
        return pools;
    }

    for (i, a) in entrants.iter().enumerate() {
        for b in &entrants[i + 1..] {
            if let Some(candidate) = relaxed_candidate(*a, *b) {
                pools.push(candidate);
            }
        }
    }

    pools.ranked()
}
