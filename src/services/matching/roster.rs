// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Eligible participants and their validated slots.

use crate::models::{AvailabilitySlot, Participant, ProfileRecord, SlotRecord};
use std::collections::{HashMap, HashSet};

/// A participant admitted to a matching run, with at least one slot.
#[derive(Debug, Clone)]
pub struct Entrant {
    pub participant: Participant,
    pub slots: Vec<AvailabilitySlot>,
}

impl Entrant {
    pub fn user_id(&self) -> &str {
        &self.participant.user_id
    }
}

/// The candidate universe of one run, in input order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entrants: Vec<Entrant>,
    skipped_slots: u32,
}

impl Roster {
    /// Keep completed, active profiles that have at least one usable slot.
    ///
    /// Slots that fail validation or repeat an earlier slot exactly are
    /// dropped and counted. A repeated profile keeps its first record.
    pub fn build(profiles: &[ProfileRecord], slots: &[SlotRecord]) -> Self {
        let mut skipped_slots = 0u32;
        let mut slots_by_user: HashMap<&str, Vec<AvailabilitySlot>> = HashMap::new();

        for record in slots {
            match AvailabilitySlot::try_from(record) {
                Ok(slot) => {
                    let user_slots = slots_by_user.entry(record.user_id.as_str()).or_default();
                    if user_slots.contains(&slot) {
                        skipped_slots += 1;
                        tracing::debug!(user_id = %record.user_id, "Ignoring duplicate availability slot");
                    } else {
                        user_slots.push(slot);
                    }
                }
                Err(e) => {
                    skipped_slots += 1;
                    tracing::warn!(
                        user_id = %record.user_id,
                        error = %e,
                        "Ignoring malformed availability slot"
                    );
                }
            }
        }

        let mut seen = HashSet::new();
        let entrants = profiles
            .iter()
            .filter(|profile| profile.is_eligible())
            .filter(|profile| seen.insert(profile.user_id.as_str()))
            .filter_map(|profile| {
                let slots = slots_by_user.remove(profile.user_id.as_str())?;
                Some(Entrant {
                    participant: Participant::from(profile),
                    slots,
                })
            })
            .collect();

        Self {
            entrants,
            skipped_slots,
        }
    }

    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    pub fn skipped_slots(&self) -> u32 {
        self.skipped_slots
    }
}
