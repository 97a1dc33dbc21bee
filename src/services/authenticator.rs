//! Authenticator
//!
//! Resolves a raw `Authorization` header value to a user. A missing header,
//! a malformed header, and an unknown token all produce the same `Ok(None)`
//! outcome; only infrastructure failures surface as errors.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::db::repositories::{AccessTokenRepository, UserRepository};
use crate::models::User;

/// Expected scheme prefix in the Authorization header
const BEARER_PREFIX: &str = "Bearer ";

/// Read-only resolver from bearer tokens to users
pub struct Authenticator {
    token_repo: Arc<dyn AccessTokenRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl Authenticator {
    /// Create a new authenticator
    pub fn new(
        token_repo: Arc<dyn AccessTokenRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            token_repo,
            user_repo,
        }
    }

    /// Resolve a raw header value to the owning user.
    ///
    /// Strips the `Bearer ` prefix when present; a header without it is
    /// looked up as a raw token value, which simply fails to match.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<Option<User>> {
        let raw = match header {
            Some(value) if !value.trim().is_empty() => value,
            _ => return Ok(None),
        };

        let token_value = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw);

        let record = self
            .token_repo
            .get_by_token(token_value)
            .await
            .context("Failed to look up access token")?;

        let Some(record) = record else {
            return Ok(None);
        };

        let user = self
            .user_repo
            .get_by_id(record.user_id)
            .await
            .context("Failed to load token owner")?;

        Ok(user)
    }
}
