// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod event;
pub mod score;
pub mod stats;
pub mod user;

pub use event::{Event, YearKey};
pub use score::ScoreRecord;
pub use stats::ScoreStats;
pub use user::User;
