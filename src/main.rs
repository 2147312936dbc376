// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily Pinpoint API Server
//!
//! Serves the daily "where did it happen" puzzle, scores guesses by
//! great-circle distance and keeps per-day scores for signed-in players.

use daily_pinpoint::{
    config::Config,
    db::FirestoreDb,
    services::{EventCatalog, PasswordHasher, ScoreService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Daily Pinpoint API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Load the event catalog once; it is read-only from here on
    tracing::info!(path = %config.events_path, "Loading event catalog");
    let catalog =
        EventCatalog::load_from_file(&config.events_path).expect("Failed to load event catalog");
    tracing::info!(count = catalog.len(), "Event catalog loaded");

    let password_hasher = PasswordHasher::new(config.password_iterations)
        .expect("Invalid password hashing configuration");

    // Merge locks are shared by every request on this instance
    let merge_locks = Arc::new(dashmap::DashMap::new());
    let score_service = ScoreService::new(db.clone(), merge_locks);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        catalog,
        score_service,
        password_hasher,
    });

    // Build router
    let app = daily_pinpoint::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("daily_pinpoint=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
