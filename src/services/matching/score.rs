// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Compatibility scoring.
//!
//! Both passes share the profile affinity terms (interest and gift
//! Jaccard) and the site bonuses; they differ in how time is rewarded.

use super::location::SiteMatch;
use crate::models::Participant;
use crate::time_utils::MINUTES_PER_DAY;
use std::collections::BTreeSet;

const STRICT_INTEREST_WEIGHT: f64 = 0.5;
const STRICT_GIFT_WEIGHT: f64 = 0.2;
const STRICT_OVERLAP_WEIGHT: f64 = 0.3;
/// Overlap at which the strict time term saturates.
const STRICT_OVERLAP_SATURATION_MINUTES: f64 = 120.0;

const RELAXED_INTEREST_WEIGHT: f64 = 0.45;
const RELAXED_GIFT_WEIGHT: f64 = 0.2;
const RELAXED_TIME_WEIGHT: f64 = 0.25;
const RELAXED_DATE_PENALTY_WEIGHT: f64 = 0.1;
const RELAXED_OVERLAP_SATURATION_MINUTES: f64 = 90.0;
/// Gap at which two windows count as unrelated.
const RELAXED_GAP_HORIZON_MINUTES: f64 = 180.0;
const RELAXED_DATE_HORIZON_MINUTES: f64 = (3 * MINUTES_PER_DAY) as f64;

const CAMPUS_BONUS: f64 = 0.1;
const LOCATION_BONUS: f64 = 0.05;

/// |A ∩ B| / |A ∪ B|, or 0 when either set is empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    shared as f64 / union as f64
}

/// Profile similarity between two participants, independent of slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affinity {
    pub interests: f64,
    pub gifts: f64,
}

impl Affinity {
    pub fn between(a: &Participant, b: &Participant) -> Self {
        Self {
            interests: jaccard(&a.interests, &b.interests),
            gifts: jaccard(&a.gift_tags, &b.gift_tags),
        }
    }
}

fn site_bonus(site: SiteMatch) -> f64 {
    let mut bonus = 0.0;
    if site.campus {
        bonus += CAMPUS_BONUS;
    }
    if site.location {
        bonus += LOCATION_BONUS;
    }
    bonus
}

/// Score of a strict candidate with a genuine shared window.
pub fn strict_score(affinity: Affinity, overlap_minutes: i64, site: SiteMatch) -> f64 {
    let overlap = (overlap_minutes as f64 / STRICT_OVERLAP_SATURATION_MINUTES).min(1.0);
    STRICT_INTEREST_WEIGHT * affinity.interests
        + STRICT_GIFT_WEIGHT * affinity.gifts
        + STRICT_OVERLAP_WEIGHT * overlap
        + site_bonus(site)
}

/// Time desirability of a relaxed slot pairing, in [0, 1].
pub fn relaxed_time_score(overlap_minutes: i64, gap_minutes: i64) -> f64 {
    if overlap_minutes > 0 {
        (overlap_minutes as f64 / RELAXED_OVERLAP_SATURATION_MINUTES).min(1.0)
    } else {
        1.0 - (gap_minutes as f64 / RELAXED_GAP_HORIZON_MINUTES).min(1.0)
    }
}

/// Penalty for slots on different days, in [0, 1].
pub fn date_penalty(date_diff_minutes: i64) -> f64 {
    (date_diff_minutes as f64 / RELAXED_DATE_HORIZON_MINUTES).min(1.0)
}

/// Score of a relaxed candidate.
pub fn relaxed_score(affinity: Affinity, time_score: f64, site: SiteMatch, penalty: f64) -> f64 {
    RELAXED_INTEREST_WEIGHT * affinity.interests
        + RELAXED_GIFT_WEIGHT * affinity.gifts
        + RELAXED_TIME_WEIGHT * time_score
        + site_bonus(site)
        - RELAXED_DATE_PENALTY_WEIGHT * penalty
}
