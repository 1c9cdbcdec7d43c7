// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Bilgi Santa: Secret Santa pairing for a university community
//!
//! This crate provides the backend API that pairs participants by shared
//! availability and interests, and stores the resulting meetings.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use middleware::admin::AdminPolicy;
use services::{MatchingService, RunLocks};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub matching: MatchingService,
    pub run_locks: RunLocks,
    pub admin_policy: AdminPolicy,
}
