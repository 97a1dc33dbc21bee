//! Auth service
//!
//! Implements the login/logout half of token management: exchanging a
//! presented code for an access token and revoking the token on logout.
//! The real credential exchange against an identity provider lives outside
//! this service; the code presented here identifies an externally
//! provisioned account.

use anyhow::Context;
use std::sync::Arc;

use crate::db::repositories::{AccessTokenRepository, UserRepository};
use crate::models::AccessToken;

/// Error types for auth service operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// The presented code did not resolve to an account
    #[error("Invalid authentication code")]
    InvalidCode,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Service issuing and revoking access tokens
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    token_repo: Arc<dyn AccessTokenRepository>,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_repo: Arc<dyn AccessTokenRepository>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
        }
    }

    /// Exchange an authentication code for an access token.
    ///
    /// Returns the user's existing token when one is already issued (tokens
    /// are one per user and immutable), otherwise generates and persists a
    /// fresh one.
    ///
    /// # Errors
    ///
    /// - `InvalidCode` if the code is blank or matches no account
    /// - `InternalError` for database errors
    pub async fn exchange_code(&self, code: &str) -> Result<AccessToken, AuthServiceError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AuthServiceError::InvalidCode);
        }

        let user = self
            .user_repo
            .get_by_login(code)
            .await
            .context("Failed to resolve authentication code")?
            .ok_or(AuthServiceError::InvalidCode)?;

        if let Some(existing) = self
            .token_repo
            .get_by_user(user.id)
            .await
            .context("Failed to look up existing token")?
        {
            return Ok(existing);
        }

        let token = self
            .token_repo
            .create(&AccessToken::generate(user.id))
            .await
            .context("Failed to create access token")?;

        Ok(token)
    }

    /// Revoke a token, returning whether one was actually removed.
    pub async fn revoke(&self, token: &str) -> Result<bool, AuthServiceError> {
        let removed = self
            .token_repo
            .delete_by_token(token)
            .await
            .context("Failed to revoke access token")?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxAccessTokenRepository, SqlxUserRepository};
    use crate::db::{create_test_pool, migrations};
    use crate::models::User;

    async fn setup() -> (AuthService, Arc<dyn AccessTokenRepository>) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let user_repo = SqlxUserRepository::boxed(pool.clone());
        let token_repo = SqlxAccessTokenRepository::boxed(pool.clone());

        user_repo
            .create(&User::new("jsmith".to_string(), "github".to_string()))
            .await
            .expect("Failed to create user");

        (
            AuthService::new(user_repo, token_repo.clone()),
            token_repo,
        )
    }

    #[tokio::test]
    async fn test_exchange_valid_code_issues_token() {
        let (service, token_repo) = setup().await;

        let token = service
            .exchange_code("jsmith")
            .await
            .expect("Exchange should succeed");
        assert!(!token.token.is_empty());

        let stored = token_repo
            .get_by_token(&token.token)
            .await
            .expect("Lookup failed")
            .expect("Token should be persisted");
        assert_eq!(stored.user_id, token.user_id);
    }

    #[tokio::test]
    async fn test_exchange_returns_existing_token() {
        let (service, _token_repo) = setup().await;

        let first = service
            .exchange_code("jsmith")
            .await
            .expect("Exchange should succeed");
        let second = service
            .exchange_code("jsmith")
            .await
            .expect("Exchange should succeed");

        assert_eq!(first.token, second.token);
    }

    #[tokio::test]
    async fn test_exchange_unknown_code_fails() {
        let (service, _token_repo) = setup().await;

        let result = service.exchange_code("nobody").await;
        assert!(matches!(result, Err(AuthServiceError::InvalidCode)));
    }

    #[tokio::test]
    async fn test_exchange_blank_code_fails() {
        let (service, _token_repo) = setup().await;

        let result = service.exchange_code("  ").await;
        assert!(matches!(result, Err(AuthServiceError::InvalidCode)));
    }

    #[tokio::test]
    async fn test_revoke_token() {
        let (service, token_repo) = setup().await;

        let token = service
            .exchange_code("jsmith")
            .await
            .expect("Exchange should succeed");

        assert!(service
            .revoke(&token.token)
            .await
            .expect("Revoke should succeed"));
        assert!(token_repo
            .get_by_token(&token.token)
            .await
            .expect("Lookup failed")
            .is_none());

        // Already gone
        assert!(!service
            .revoke(&token.token)
            .await
            .expect("Revoke should succeed"));
    }

    #[tokio::test]
    async fn test_login_after_logout_mints_fresh_token() {
        let (service, _token_repo) = setup().await;

        let first = service.exchange_code("jsmith").await.expect("Exchange failed");
        service.revoke(&first.token).await.expect("Revoke failed");

        let second = service.exchange_code("jsmith").await.expect("Exchange failed");
        assert_ne!(first.token, second.token);
    }
}
