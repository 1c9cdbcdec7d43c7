// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bilgi Santa API Server
//!
//! Pairs Secret Santa participants by shared availability and interests
//! and records where and when each pair meets.

use bilgi_santa::{
    config::Config,
    db::FirestoreDb,
    middleware::admin::email_allowlist,
    services::{MatchingService, RunLocks},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Bilgi Santa API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    tracing::info!(count = config.admin_emails.len(), "Admin allowlist loaded");
    let admin_policy = email_allowlist(&config.admin_emails);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        matching: MatchingService::new(db.clone()),
        db,
        run_locks: RunLocks::new(),
        admin_policy,
    });

    // Build router
    let app = bilgi_santa::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bilgi_santa=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
