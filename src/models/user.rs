//! User model
//!
//! Users are provisioned externally (the credential exchange lives outside
//! this service); the backend only reads them and attaches owned articles,
//! comments, and at most one access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing an externally provisioned account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Login handle (unique)
    pub login: String,
    /// Identity provider that created the account
    pub provider: String,
    /// Display name
    pub name: Option<String>,
    /// Profile URL
    pub url: Option<String>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the given login and provider.
    ///
    /// Profile fields start empty; the id is assigned by the database.
    pub fn new(login: String, provider: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the database
            login,
            provider,
            name: None,
            url: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the profile URL
    pub fn with_url(mut self, url: String) -> Self {
        self.url = Some(url);
        self
    }

    /// Set the avatar URL
    pub fn with_avatar_url(mut self, avatar_url: String) -> Self {
        self.avatar_url = Some(avatar_url);
        self
    }
}
