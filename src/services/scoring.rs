// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Guess scoring: distance computation, daily merge and statistics.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::{Event, ScoreRecord, ScoreStats};
use crate::services::distance;
use chrono::NaiveDate;
use dashmap::DashMap;
use geo::Point;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Per-(user, date) locks serializing merges within this instance.
pub type MergeLocks = Arc<DashMap<(String, NaiveDate), Arc<Mutex<()>>>>;

/// Outcome of scoring a single guess.
#[derive(Debug, Clone)]
pub struct ScoredGuess {
    /// Unrounded distance from the guess to the event (km)
    pub distance_km: f64,
    /// Stored daily record, present only for authenticated players
    pub record: Option<ScoreRecord>,
}

/// Scores guesses and maintains the per-day score records.
///
/// Cross-instance atomicity comes from the Firestore transaction in
/// [`FirestoreDb::record_score_atomic`]; the local lock keeps concurrent
/// requests from the same user on this instance from contending inside it.
#[derive(Clone)]
pub struct ScoreService {
    db: FirestoreDb,
    merge_locks: MergeLocks,
}

impl ScoreService {
    pub fn new(db: FirestoreDb, merge_locks: MergeLocks) -> Self {
        Self { db, merge_locks }
    }

    /// Score a guess against an event and, for a signed-in player, merge
    /// the distance into the record for `date`.
    pub async fn score_guess(
        &self,
        user: Option<&AuthUser>,
        event: &Event,
        guess: Point<f64>,
        date: NaiveDate,
    ) -> Result<ScoredGuess, AppError> {
        let distance_km = distance::distance_between(guess, event.location());

        let record = match user {
            Some(user) => Some(self.record(user, date, distance_km).await?),
            None => None,
        };

        Ok(ScoredGuess {
            distance_km,
            record,
        })
    }

    /// Merge a distance into the user's record for `date`.
    pub async fn record(
        &self,
        user: &AuthUser,
        date: NaiveDate,
        distance_km: f64,
    ) -> Result<ScoreRecord, AppError> {
        let key = (user.user_id.clone(), date);
        let lock = self
            .merge_locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let result = {
            let _guard = lock.lock().await;
            self.db
                .record_score_atomic(&user.user_id, date, distance_km)
                .await
        };

        // Drop the lock entry once nobody else is waiting on it.
        drop(lock);
        self.merge_locks
            .remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);

        result
    }

    /// Compute statistics over a user's full score history.
    pub async fn stats_for(&self, user: &AuthUser) -> Result<ScoreStats, AppError> {
        let records = self.db.get_scores_for_user(&user.user_id).await?;
        Ok(ScoreStats::aggregate(&records))
    }
}
