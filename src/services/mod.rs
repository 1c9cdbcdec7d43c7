// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business logic services.

pub mod matching;
pub mod meeting_code;
pub mod run_lock;

pub use matching::{MatchingError, MatchingOutcome, MatchingService};
pub use meeting_code::{MeetingCodes, RandomMeetingCodes};
pub use run_lock::{RunLocks, MATCHING_RUN};
