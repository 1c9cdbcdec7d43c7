// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::Match;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/matches", get(get_my_matches))
}

// ─── Current User ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    pub user_id: String,
    pub email: Option<String>,
    pub is_admin: bool,
}

/// Identity of the caller, as seen by the backend.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<MeResponse> {
    let is_admin = (state.admin_policy)(&user);
    Json(MeResponse {
        user_id: user.user_id,
        email: user.email,
        is_admin,
    })
}

// ─── Matches ─────────────────────────────────────────────────

/// The caller's matches.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MyMatchesResponse {
    pub matches: Vec<Match>,
}

/// Stored matches involving the caller, latest meeting first.
async fn get_my_matches(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MyMatchesResponse>> {
    let mut matches = state.db.get_matches_for_user(&user.user_id).await?;
    matches.sort_by_key(|m| Reverse((m.meeting_date, m.meeting_start)));

    Ok(Json(MyMatchesResponse { matches }))
}
