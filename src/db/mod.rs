//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Daily scores (keyed by `{user_id}_{YYYY-MM-DD}`)
    pub const SCORES: &str = "scores";
}
