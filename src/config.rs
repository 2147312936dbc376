// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Secrets are injected as environment variables by the deployment, so
//! there is a single loading path for local development and production.

use std::env;

/// Default PBKDF2 rounds for newly hashed passwords.
pub const DEFAULT_PASSWORD_ITERATIONS: u32 = 600_000;

/// Default base year for the game-year formula.
pub const DEFAULT_PUZZLE_BASE_YEAR: i32 = 2025;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL (CORS origin, cookie security)
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Path to the event catalog JSON
    pub events_path: String,
    /// Base year of the daily puzzle formula
    pub puzzle_base_year: i32,
    /// PBKDF2 iterations for new password hashes
    pub password_iterations: u32,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Config for tests: offline values and cheap password hashing.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            events_path: "data/events.json".to_string(),
            puzzle_base_year: DEFAULT_PUZZLE_BASE_YEAR,
            password_iterations: 1_000,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: parse_or_default("PORT", 8080)?,
            events_path: env::var("EVENTS_PATH")
                .unwrap_or_else(|_| "data/events.json".to_string()),
            puzzle_base_year: parse_or_default("PUZZLE_BASE_YEAR", DEFAULT_PUZZLE_BASE_YEAR)?,
            password_iterations: parse_or_default(
                "PASSWORD_ITERATIONS",
                DEFAULT_PASSWORD_ITERATIONS,
            )?,

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Whether session cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

/// Parse an optional numeric variable, rejecting garbage instead of
/// silently falling back.
fn parse_or_default<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
