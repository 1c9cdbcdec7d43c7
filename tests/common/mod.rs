// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use bilgi_santa::config::Config;
use bilgi_santa::db::FirestoreDb;
use bilgi_santa::middleware::admin::email_allowlist;
use bilgi_santa::models::{ProfileRecord, SlotRecord};
use bilgi_santa::routes::create_router;
use bilgi_santa::services::{MatchingError, MatchingService, MeetingCodes, RunLocks};
use bilgi_santa::AppState;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(), test_db_offline())
}

/// Create a test app from the given config and database.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config, db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let admin_policy = email_allowlist(&config.admin_emails);

    let state = Arc::new(AppState {
        config,
        matching: MatchingService::new(db.clone()),
        db,
        run_locks: RunLocks::new(),
        admin_policy,
    });

    (create_router(state.clone()), state)
}

/// Session token signed with the test key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, email: Option<&str>, state: &AppState) -> String {
    sign_test_jwt(user_id, email, None, &state.config.jwt_signing_key)
}

/// Session token with an explicit audience claim (or none).
#[allow(dead_code)]
pub fn sign_test_jwt(user_id: &str, email: Option<&str>, aud: Option<&str>, key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        aud: Option<&'a str>,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id,
        email,
        aud,
        exp: now + 86400,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(key),
    )
    .unwrap()
}

/// Completed, active profile.
#[allow(dead_code)]
pub fn profile(user_id: &str, gender: Option<&str>, interests: &[&str]) -> ProfileRecord {
    ProfileRecord {
        user_id: user_id.to_string(),
        display_name: Some(format!("Participant {user_id}")),
        gender: gender.map(String::from),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        gift_preferences: None,
        profile_completed: true,
        is_active: true,
    }
}

#[allow(dead_code)]
pub fn slot(user_id: &str, date: &str, start: &str, end: &str) -> SlotRecord {
    SlotRecord {
        user_id: user_id.to_string(),
        slot_date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        campus: None,
        location: None,
    }
}

#[allow(dead_code)]
pub fn slot_at(
    user_id: &str,
    date: &str,
    start: &str,
    end: &str,
    campus: &str,
    location: &str,
) -> SlotRecord {
    SlotRecord {
        campus: Some(campus.to_string()),
        location: Some(location.to_string()),
        ..slot(user_id, date, start, end)
    }
}

/// Meeting codes that count up, so runs are reproducible.
#[allow(dead_code)]
#[derive(Default)]
pub struct SequentialCodes(pub u32);

impl MeetingCodes for SequentialCodes {
    fn next_code(&mut self) -> Result<String, MatchingError> {
        self.0 += 1;
        Ok(format!("BILGI-{:04}", self.0))
    }
}
