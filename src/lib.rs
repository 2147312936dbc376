// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily Pinpoint: guess where history happened.
//!
//! This crate provides the backend API for the daily geography puzzle:
//! event lookup by game year, great-circle scoring of guesses, per-day
//! score merging and personal statistics.

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
use services::{EventCatalog, PasswordHasher, ScoreService};

/// Shared application state.
///
/// Built once at startup and handed to every handler; nothing in here is
/// mutated after construction except through the database.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub catalog: EventCatalog,
    pub score_service: ScoreService,
    pub password_hasher: PasswordHasher,
}
