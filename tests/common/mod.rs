// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use daily_pinpoint::config::Config;
use daily_pinpoint::db::FirestoreDb;
use daily_pinpoint::routes::create_router;
use daily_pinpoint::services::{EventCatalog, PasswordHasher, ScoreService};
use daily_pinpoint::AppState;
use std::sync::Arc;

/// Small catalog used by the API tests.
#[allow(dead_code)]
pub const TEST_EVENTS: &str = r#"{
    "1703": {"name": "Founding of Saint Petersburg", "lat": 59.95, "lon": 30.3167, "hint": "A new capital on the Neva."},
    "1789": {"name": "Storming of the Bastille", "lat": 48.8532, "lon": 2.3692, "hint": "A fortress prison falls."}
}"#;

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

/// Build shared state around a database handle.
#[allow(dead_code)]
pub fn test_state(db: FirestoreDb) -> Arc<AppState> {
    let config = Config::test_default();
    let catalog = EventCatalog::load_from_json(TEST_EVENTS).expect("Test catalog should parse");
    let password_hasher =
        PasswordHasher::new(config.password_iterations).expect("Test hasher should build");
    let score_service = ScoreService::new(db.clone(), Arc::new(dashmap::DashMap::new()));

    Arc::new(AppState {
        config,
        db,
        catalog,
        score_service,
        password_hasher,
    })
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = test_state(test_db_offline());
    (create_router(state.clone()), state)
}

/// Create a test JWT token.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    daily_pinpoint::middleware::auth::create_jwt(user_id, signing_key)
        .expect("Failed to create JWT")
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

/// Generate a unique username for test isolation.
#[allow(dead_code)]
pub fn unique_username(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    // Keep within the 20 character limit.
    format!("{}{}", prefix, nanos % 1_000_000_000_000)
}
