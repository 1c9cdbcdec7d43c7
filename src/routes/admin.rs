// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Administrative routes.
//!
//! Auth and admin middleware are applied in routes/mod.rs.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Match, MatchingReport};
use crate::services::MATCHING_RUN;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::post,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/admin/matching/run", post(run_matching))
}

#[derive(Debug, Default, Deserialize)]
pub struct RunParams {
    /// Compute matches without storing them
    #[serde(default)]
    pub dry_run: bool,
}

/// Result of a matching run.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunMatchingResponse {
    pub summary: String,
    pub report: MatchingReport,
    pub matches: Vec<Match>,
    pub persisted: bool,
    pub generated_at: String,
}

/// Pair the whole active population.
///
/// Only one run may be in flight per instance; a concurrent request gets
/// 409 rather than queueing behind the first.
async fn run_matching(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Query(params): Query<RunParams>,
) -> Result<Json<RunMatchingResponse>> {
    let Some(_guard) = state.run_locks.try_acquire(MATCHING_RUN) else {
        tracing::warn!(user_id = %admin.user_id, "Matching run rejected: already running");
        return Err(AppError::Conflict(
            "A matching run is already in progress".to_string(),
        ));
    };

    tracing::info!(
        user_id = %admin.user_id,
        dry_run = params.dry_run,
        "Matching run started"
    );

    let outcome = state.matching.generate().await?;
    let matches = outcome.matches();

    let persisted = if params.dry_run || matches.is_empty() {
        false
    } else {
        state.db.insert_matches(&matches).await.map_err(|e| {
            tracing::error!(error = %e, count = matches.len(), "Failed to store matches");
            e
        })?;
        true
    };

    Ok(Json(RunMatchingResponse {
        summary: outcome.summary(),
        report: outcome.report,
        matches,
        persisted,
        generated_at: format_utc_rfc3339(chrono::Utc::now()),
    }))
}
