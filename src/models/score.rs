// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily score record and the same-day merge policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One stored score per (user, date).
///
/// Stored at: `scores/{user_id}_{YYYY-MM-DD}`. The document ID is the
/// uniqueness constraint for the pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Owner (normalized username)
    pub user_id: String,
    /// Calendar date the guesses were made on
    pub date: NaiveDate,
    /// Merged distance in kilometers (lower is better)
    pub score: f64,
    /// Number of guesses merged into `score`
    #[serde(default = "default_guesses")]
    pub guesses: u32,
    /// Last update timestamp (ISO 8601)
    #[serde(default)]
    pub updated_at: String,
}

fn default_guesses() -> u32 {
    1
}

/// Combine an existing same-day score with a new distance.
///
/// Each new guess carries half the weight regardless of how many guesses
/// already went into `existing`; this is not a running arithmetic mean.
pub fn merge_scores(existing: f64, new_distance: f64) -> f64 {
    (existing + new_distance) / 2.0
}

impl ScoreRecord {
    /// Document ID for a (user, date) pair.
    pub fn document_id(user_id: &str, date: NaiveDate) -> String {
        format!("{}_{}", user_id, date.format("%Y-%m-%d"))
    }

    /// Record a guess against the record currently stored for the day.
    ///
    /// With no existing record the score is exactly `distance_km`.
    /// A record from another user or another date is never merged into.
    pub fn apply_guess(
        existing: Option<ScoreRecord>,
        user_id: &str,
        date: NaiveDate,
        distance_km: f64,
        now: &str,
    ) -> ScoreRecord {
        match existing {
            Some(mut record) if record.user_id == user_id && record.date == date => {
                record.score = merge_scores(record.score, distance_km);
                record.guesses = record.guesses.saturating_add(1);
                record.updated_at = now.to_string();
                record
            }
            _ => ScoreRecord {
                user_id: user_id.to_string(),
                date,
                score: distance_km,
                guesses: 1,
                updated_at: now.to_string(),
            },
        }
    }

    /// Whether this record was produced by merging into an earlier guess.
    pub fn is_merged(&self) -> bool {
        self.guesses > 1
    }
}
