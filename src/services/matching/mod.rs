// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Secret Santa pairing engine.
//!
//! Pipeline:
//! 1. Build the roster (eligible profiles with validated slots)
//! 2. Generate and rank strict candidates (true overlap >= 30 minutes)
//! 3. Run the phase table, falling back to relaxed candidates for
//!    whoever is left
//! 4. Report match records and a summary
//!
//! The engine itself does no I/O; [`MatchingService`] loads its inputs.

pub mod assign;
pub mod candidate;
pub mod engine;
pub mod location;
pub mod rank;
pub mod relaxed;
pub mod roster;
pub mod score;

pub use assign::{Assignment, MatchLedger, PassKind};
pub use candidate::{Bucket, Candidate, CandidatePools};
pub use engine::{pair_participants, run_phase, MatchingOutcome, Phase, PHASES};
pub use roster::{Entrant, Roster};

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::services::meeting_code::RandomMeetingCodes;

/// Errors from loading or running the pairing engine.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("Failed to load {collection}: {reason}")]
    Load {
        collection: &'static str,
        reason: String,
    },

    #[error("Meeting code generation failed")]
    CodeGeneration,
}

impl From<MatchingError> for AppError {
    fn from(err: MatchingError) -> Self {
        match err {
            MatchingError::Load { .. } => AppError::Upstream(err.to_string()),
            MatchingError::CodeGeneration => AppError::Internal(anyhow::anyhow!(err)),
        }
    }
}

/// Loads matching inputs and runs the engine.
#[derive(Clone)]
pub struct MatchingService {
    db: FirestoreDb,
}

impl MatchingService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Read profiles and availability concurrently. Either read failing
    /// aborts the whole run.
    pub async fn load_roster(&self) -> Result<Roster, MatchingError> {
        let profiles = async {
            self.db
                .list_eligible_profiles()
                .await
                .map_err(|e| MatchingError::Load {
                    collection: "profiles",
                    reason: e.to_string(),
                })
        };
        let slots = async {
            self.db
                .list_availability_slots()
                .await
                .map_err(|e| MatchingError::Load {
                    collection: "availability slots",
                    reason: e.to_string(),
                })
        };

        let (profiles, slots) = tokio::try_join!(profiles, slots)?;

        tracing::info!(
            profiles = profiles.len(),
            slots = slots.len(),
            "Loaded matching inputs"
        );

        Ok(Roster::build(&profiles, &slots))
    }

    /// Produce a fresh set of matches for the whole active population.
    ///
    /// Nothing is persisted here; the caller decides what to store.
    pub async fn generate(&self) -> Result<MatchingOutcome, AppError> {
        let roster = self.load_roster().await?;

        let outcome = tokio::task::spawn_blocking(move || {
            let mut codes = RandomMeetingCodes::new();
            pair_participants(&roster, &mut codes)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Matching task failed: {}", e)))??;

        Ok(outcome)
    }
}
