//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User account stored in Firestore.
///
/// Stored at: `users/{username}`; the normalized username doubles as the
/// user ID so uniqueness is enforced by the document key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Normalized (lowercase) username
    pub username: String,
    /// Encoded PBKDF2 hash, see `services::password`
    pub password_hash: String,
    /// When the account was created (ISO 8601)
    pub created_at: String,
}

/// Normalize a username for storage and lookup.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Usernames are 3-20 characters from `[A-Za-z0-9_-]`.
pub fn is_valid_username(username: &str) -> bool {
    (3..=20).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  Alice_01 "), "alice_01");
    }

    #[test]
    fn test_username_rules() {
        assert!(is_valid_username("bob"));
        assert!(is_valid_username("map-nerd_42"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("a".repeat(21).as_str()));
        assert!(!is_valid_username("bad name"));
        assert!(!is_valid_username("slash/user"));
    }
}
