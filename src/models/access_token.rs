//! Access token model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token entity for bearer authentication.
///
/// Each user owns at most one token. The token value is generated once at
/// construction and never changes; logout deletes the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// Unique identifier
    pub id: i64,
    /// Opaque token value (unique)
    pub token: String,
    /// Owning user ID (unique, one token per user)
    pub user_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    /// Create a new token for the given user with a freshly generated value.
    pub fn generate(user_id: i64) -> Self {
        Self {
            id: 0, // Will be set by the database
            token: Uuid::new_v4().simple().to_string(),
            user_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_present_after_generation() {
        let token = AccessToken::generate(1);
        assert!(!token.token.is_empty());
        assert_eq!(token.user_id, 1);
    }

    #[test]
    fn test_generated_tokens_differ() {
        let a = AccessToken::generate(1);
        let b = AccessToken::generate(1);
        assert_ne!(a.token, b.token);
    }
}
