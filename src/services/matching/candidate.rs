// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Candidate pairs and the strict (true overlap) generator.

use super::location::{resolve_location, SiteMatch};
use super::rank::rank_candidates;
use super::roster::Entrant;
use super::score::{strict_score, Affinity};
use crate::models::{AvailabilitySlot, Participant};
use crate::time_utils::clock_at_minute;
use chrono::{NaiveDate, NaiveTime};

/// Shortest shared window that counts as a strict meeting.
pub const MIN_STRICT_OVERLAP_MINUTES: i64 = 30;

/// Scheduling pool a pair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Both declared a gender and they differ
    CrossGender,
    SameOrUnspecified,
}

impl Bucket {
    pub fn of(a: &Participant, b: &Participant) -> Self {
        match (&a.gender, &b.gender) {
            (Some(x), Some(y)) if x != y => Bucket::CrossGender,
            _ => Bucket::SameOrUnspecified,
        }
    }
}

/// Where and when a pair would meet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingSlot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub location: Option<String>,
    pub location_match: bool,
}

/// A scored, run-local proposal to pair two entrants.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub a: &'a Entrant,
    pub b: &'a Entrant,
    pub score: f64,
    pub overlap_minutes: i64,
    pub campus_match: bool,
    pub location_match: bool,
    pub bucket: Bucket,
    pub slot: MeetingSlot,
}

impl Candidate<'_> {
    pub fn is_cross_gender(&self) -> bool {
        self.bucket == Bucket::CrossGender
    }
}

/// Candidates split by bucket. Each pool is ranked on its own.
#[derive(Debug, Default)]
pub struct CandidatePools<'a> {
    pub cross_gender: Vec<Candidate<'a>>,
    pub same_or_unspecified: Vec<Candidate<'a>>,
}

impl<'a> CandidatePools<'a> {
    pub fn push(&mut self, candidate: Candidate<'a>) {
        match candidate.bucket {
            Bucket::CrossGender => self.cross_gender.push(candidate),
            Bucket::SameOrUnspecified => self.same_or_unspecified.push(candidate),
        }
    }

    pub fn pool(&self, bucket: Bucket) -> &[Candidate<'a>] {
        match bucket {
            Bucket::CrossGender => &self.cross_gender,
            Bucket::SameOrUnspecified => &self.same_or_unspecified,
        }
    }

    pub fn len(&self) -> usize {
        self.cross_gender.len() + self.same_or_unspecified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rank both pools independently.
    pub fn ranked(mut self) -> Self {
        rank_candidates(&mut self.cross_gender);
        rank_candidates(&mut self.same_or_unspecified);
        self
    }
}

/// Best same-day intersection between two slot lists.
struct SharedWindow<'s> {
    a: &'s AvailabilitySlot,
    b: &'s AvailabilitySlot,
    start_minute: i64,
    end_minute: i64,
    site: SiteMatch,
}

impl SharedWindow<'_> {
    fn minutes(&self) -> i64 {
        self.end_minute - self.start_minute
    }
}

/// Longest qualifying overlap; on equal length a shared campus wins.
fn best_shared_window<'s>(
    a_slots: &'s [AvailabilitySlot],
    b_slots: &'s [AvailabilitySlot],
) -> Option<SharedWindow<'s>> {
    let mut best: Option<SharedWindow<'s>> = None;

    for a in a_slots {
        for b in b_slots.iter().filter(|b| b.date == a.date) {
            let start_minute = a.start_minute().max(b.start_minute());
            let end_minute = a.end_minute().min(b.end_minute());
            if end_minute - start_minute < MIN_STRICT_OVERLAP_MINUTES {
                continue;
            }

            let window = SharedWindow {
                a,
                b,
                start_minute,
                end_minute,
                site: SiteMatch::between(a, b),
            };

            let better = match &best {
                None => true,
                Some(current) => {
                    window.minutes() > current.minutes()
                        || (window.minutes() == current.minutes()
                            && window.site.campus
                            && !current.site.campus)
                }
            };
            if better {
                best = Some(window);
            }
        }
    }

    best
}

/// Evaluate one pair for the strict pass.
pub fn strict_candidate<'a>(a: &'a Entrant, b: &'a Entrant) -> Option<Candidate<'a>> {
    let window = best_shared_window(&a.slots, &b.slots)?;
    let overlap_minutes = window.minutes();
    let affinity = Affinity::between(&a.participant, &b.participant);

    Some(Candidate {
        a,
        b,
        score: strict_score(affinity, overlap_minutes, window.site),
        overlap_minutes,
        campus_match: window.site.campus,
        location_match: window.site.location,
        bucket: Bucket::of(&a.participant, &b.participant),
        slot: MeetingSlot {
            date: window.a.date,
            start: clock_at_minute(window.start_minute),
            end: clock_at_minute(window.end_minute),
            location: resolve_location(window.a, window.b, window.site),
            location_match: window.site.location,
        },
    })
}

/// Strict candidates for every unordered pair of entrants, ranked.
pub fn strict_candidates<'a>(entrants: &[&'a Entrant]) -> CandidatePools<'a> {
    let mut pools = CandidatePools::default();

    for (i, a) in entrants.iter().enumerate() {
        for b in &entrants[i + 1..] {
            if let Some(candidate) = strict_candidate(*a, *b) {
                pools.push(candidate);
            }
        }
    }

    pools.ranked()
}
