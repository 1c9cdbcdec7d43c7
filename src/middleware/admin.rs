// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin capability check.
//!
//! Runs after [`require_auth`](super::auth::require_auth) and decides from
//! the authenticated identity alone whether the caller may trigger
//! administrative operations.

use super::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Decides whether an authenticated user holds the admin capability.
pub type AdminPolicy = Arc<dyn Fn(&AuthUser) -> bool + Send + Sync>;

/// Policy granting admin to users whose email is on the list.
///
/// Comparison ignores case. Users without an email are never admins.
pub fn email_allowlist<I, S>(emails: I) -> AdminPolicy
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let allowed: Vec<String> = emails
        .into_iter()
        .map(|e| e.as_ref().trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    Arc::new(move |user: &AuthUser| {
        user.email
            .as_deref()
            .map(|email| email.trim().to_lowercase())
            .is_some_and(|email| allowed.contains(&email))
    })
}

/// Middleware that requires the admin capability.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user) = request.extensions().get::<AuthUser>() else {
        return Err(AppError::Unauthorized);
    };

    if !(state.admin_policy)(user) {
        tracing::warn!(user_id = %user.user_id, "Admin access denied");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
