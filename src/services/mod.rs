// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod distance;
pub mod password;
pub mod scoring;

pub use catalog::{CatalogError, EventCatalog};
pub use password::{PasswordError, PasswordHasher};
pub use scoring::{MergeLocks, ScoreService, ScoredGuess};
