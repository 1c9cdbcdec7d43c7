// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod matching;
pub mod profile;
pub mod slot;

pub use matching::{Match, MatchStatus, MatchingReport};
pub use profile::{Participant, ProfileRecord};
pub use slot::{AvailabilitySlot, SlotError, SlotRecord};
