//! Personal score statistics computed from a user's score history.
//!
//! The history is small (one record per day played), so statistics are
//! computed on read rather than maintained as a stored aggregate.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::ScoreRecord;

/// Aggregated statistics for a user.
///
/// The empty history yields the "no stats" value: every field `None` and
/// `days_played == 0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreStats {
    /// Arithmetic mean of the daily scores (km)
    pub average: Option<f64>,
    /// Lowest daily score (km)
    pub best: Option<f64>,
    /// Date of the record holding `best`
    pub best_date: Option<NaiveDate>,
    /// Number of daily records
    pub days_played: u32,
}

impl ScoreStats {
    /// Aggregate a score history.
    ///
    /// Ties for the best score go to the first record in iteration order;
    /// callers pass records sorted by date ascending so the earliest date
    /// wins.
    pub fn aggregate(records: &[ScoreRecord]) -> Self {
        let Some(first) = records.first() else {
            return Self::default();
        };

        let mut total = 0.0;
        let mut best = first;
        for record in records {
            total += record.score;
            if record.score < best.score {
                best = record;
            }
        }

        Self {
            average: Some(total / records.len() as f64),
            best: Some(best.score),
            best_date: Some(best.date),
            days_played: records.len() as u32,
        }
    }

    /// Whether this is the "no stats" value.
    pub fn is_empty(&self) -> bool {
        self.days_played == 0
    }
}
