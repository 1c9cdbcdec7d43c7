// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-flight guards for administrative runs.
//!
//! Guards are per process. Two instances behind a load balancer can still
//! run concurrently.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Scope key for the full matching run.
pub const MATCHING_RUN: &str = "matching";

/// Shared map of per-scope run locks for use in AppState.
#[derive(Clone, Default)]
pub struct RunLocks {
    locks: Arc<DashMap<&'static str, Arc<Mutex<()>>>>,
}

impl RunLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `scope` without waiting. `None` means a run is in progress.
    ///
    /// The scope stays claimed until the returned guard is dropped.
    pub fn try_acquire(&self, scope: &'static str) -> Option<OwnedMutexGuard<()>> {
        let lock = self.locks.entry(scope).or_default().clone();
        lock.try_lock_owned().ok()
    }

    /// True if `scope` is currently claimed.
    pub fn is_running(&self, scope: &'static str) -> bool {
        self.locks
            .get(scope)
            .is_some_and(|lock| lock.try_lock().is_err())
    }
}
