// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Profiles (written by the profile editor, read by matching)
//! - Availability slots (written by participants, read by matching)
//! - Matches (written by matching runs)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Match, ProfileRecord, SlotRecord};
use firestore::FirestoreWritePrecondition;

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// All completed, active profiles.
    pub async fn list_eligible_profiles(&self) -> Result<Vec<ProfileRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::PROFILES)
            .filter(|q| {
                q.for_all([
                    q.field("profile_completed").eq(true),
                    q.field("is_active").eq(true),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a profile.
    pub async fn upsert_profile(&self, profile: &ProfileRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PROFILES)
            .document_id(&profile.user_id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Availability Operations ─────────────────────────────────

    /// Every stored availability slot.
    pub async fn list_availability_slots(&self) -> Result<Vec<SlotRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::AVAILABILITY_SLOTS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store an availability slot. Re-adding the same window overwrites it.
    pub async fn add_availability_slot(&self, slot: &SlotRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::AVAILABILITY_SLOTS)
            .document_id(slot_document_id(slot))
            .object(slot)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Match Operations ────────────────────────────────────────

    /// Insert match records in transactional chunks.
    ///
    /// Each chunk commits atomically; a failure leaves earlier chunks
    /// stored. A document that already exists fails its chunk instead of
    /// being overwritten.
    pub async fn insert_matches(&self, matches: &[Match]) -> Result<(), AppError> {
        let client = self.get_client()?;

        for chunk in matches.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for record in chunk {
                client
                    .fluent()
                    .update()
                    .in_col(collections::MATCHES)
                    .precondition(FirestoreWritePrecondition::Exists(false))
                    .document_id(match_document_id(record))
                    .object(record)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!("Failed to add match to transaction: {}", e))
                    })?;
            }

            transaction
                .commit()
                .await
                .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;
        }

        tracing::info!(count = matches.len(), "Matches stored");

        Ok(())
    }

    /// Matches that include the given user.
    pub async fn get_matches_for_user(&self, user_id: &str) -> Result<Vec<Match>, AppError> {
        let client = self.get_client()?;
        let user_id = user_id.to_string();

        let mut found: Vec<Match> = Vec::new();
        for field in ["user_a", "user_b"] {
            let id = user_id.clone();
            let mut side: Vec<Match> = client
                .fluent()
                .select()
                .from(collections::MATCHES)
                .filter(move |q| q.for_all([q.field(field).eq(id.clone())]))
                .obj()
                .query()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            found.append(&mut side);
        }

        Ok(found)
    }
}

/// Document ID for a slot: one document per user, date and window.
pub fn slot_document_id(slot: &SlotRecord) -> String {
    format!(
        "{}_{}_{}_{}",
        slot.user_id,
        slot.slot_date.trim(),
        slot.start_time.trim().replace(':', ""),
        slot.end_time.trim().replace(':', "")
    )
}

/// Document ID for a match. A user appears in one match per run, so
/// the code plus the first user is unique within a run.
pub fn match_document_id(record: &Match) -> String {
    format!("{}_{}", record.meeting_code, record.user_a)
}
