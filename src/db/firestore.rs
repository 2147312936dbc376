// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (account storage)
//! - Scores (one merged record per user per day)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{ScoreRecord, User};
use chrono::NaiveDate;
use firestore::FirestoreConsistencySelector;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by normalized username.
    pub async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(username)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a user, failing with `Conflict` if the username is taken.
    ///
    /// The existence check and the write happen in one transaction so two
    /// concurrent registrations cannot both succeed.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let tx_client = client.clone_with_consistency_selector(
            FirestoreConsistencySelector::Transaction(transaction.transaction_id().clone()),
        );

        let existing: Option<User> = tx_client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(&user.username)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read user in transaction: {}", e))
            })?;

        if existing.is_some() {
            let _ = transaction.rollback().await;
            return Err(AppError::Conflict(format!(
                "Username {} is already taken",
                user.username
            )));
        }

        client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.username)
            .object(user)
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add user to transaction: {}", e)))?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(username = %user.username, "User created");
        Ok(())
    }

    // ─── Score Operations ────────────────────────────────────────

    /// Get the score record for a (user, date) pair.
    pub async fn get_score(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<ScoreRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::SCORES)
            .obj()
            .one(&ScoreRecord::document_id(user_id, date))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's full score history, ordered by date ascending.
    ///
    /// The order is the tie-break order for best-score selection.
    pub async fn get_scores_for_user(&self, user_id: &str) -> Result<Vec<ScoreRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SCORES)
            .filter(|q| q.field("user_id").eq(user_id))
            .order_by([("date", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Atomic Score Merge ──────────────────────────────────────

    /// Atomically record a guess distance for a user's day.
    ///
    /// Reads the day's record inside a Firestore transaction, applies the
    /// merge policy and writes the result back in the same transaction.
    /// The read registers the document for conflict detection, so two
    /// concurrent merges cannot both observe the same prior value.
    pub async fn record_score_atomic(
        &self,
        user_id: &str,
        date: NaiveDate,
        distance_km: f64,
    ) -> Result<ScoreRecord, AppError> {
        let client = self.get_client()?;
        let doc_id = ScoreRecord::document_id(user_id, date);
        let now = crate::time_utils::now_rfc3339();

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let tx_client = client.clone_with_consistency_selector(
            FirestoreConsistencySelector::Transaction(transaction.transaction_id().clone()),
        );

        // 1. Read the current record within the transaction
        let existing: Option<ScoreRecord> = tx_client
            .fluent()
            .select()
            .by_id_in(collections::SCORES)
            .obj()
            .one(&doc_id)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read score in transaction: {}", e))
            })?;

        // 2. Apply the merge policy in memory
        let record = ScoreRecord::apply_guess(existing, user_id, date, distance_km, &now);

        // 3. Write it back in the same transaction
        client
            .fluent()
            .update()
            .in_col(collections::SCORES)
            .document_id(&doc_id)
            .object(&record)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add score to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            user_id,
            date = %date,
            merged = record.is_merged(),
            score = record.score,
            "Score recorded atomically"
        );

        Ok(record)
    }
}
