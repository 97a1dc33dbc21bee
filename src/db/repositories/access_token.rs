//! Access token repository
//!
//! Database operations for bearer tokens. Token values and the user
//! association are both covered by UNIQUE constraints, so a duplicate value
//! or a second token for the same user fails at the insert.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::AccessToken;

/// Access token repository trait
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    /// Create a new token
    async fn create(&self, token: &AccessToken) -> Result<AccessToken>;

    /// Get a token record by its value
    async fn get_by_token(&self, token: &str) -> Result<Option<AccessToken>>;

    /// Get the token owned by a user, if any
    async fn get_by_user(&self, user_id: i64) -> Result<Option<AccessToken>>;

    /// Delete a token by its value, returning whether a row was removed
    async fn delete_by_token(&self, token: &str) -> Result<bool>;
}

/// SQLx-based access token repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxAccessTokenRepository {
    pool: DynDatabasePool,
}

impl SqlxAccessTokenRepository {
    /// Create a new SQLx access token repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a shared repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn AccessTokenRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl AccessTokenRepository for SqlxAccessTokenRepository {
    async fn create(&self, token: &AccessToken) -> Result<AccessToken> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_sqlite(self.pool.as_sqlite().unwrap(), token).await,
            DatabaseDriver::Mysql => create_mysql(self.pool.as_mysql().unwrap(), token).await,
        }
    }

    async fn get_by_token(&self, token: &str) -> Result<Option<AccessToken>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_by_token_sqlite(self.pool.as_sqlite().unwrap(), token).await
            }
            DatabaseDriver::Mysql => get_by_token_mysql(self.pool.as_mysql().unwrap(), token).await,
        }
    }

    async fn get_by_user(&self, user_id: i64) -> Result<Option<AccessToken>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_by_user_sqlite(self.pool.as_sqlite().unwrap(), user_id).await
            }
            DatabaseDriver::Mysql => {
                get_by_user_mysql(self.pool.as_mysql().unwrap(), user_id).await
            }
        }
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                delete_by_token_sqlite(self.pool.as_sqlite().unwrap(), token).await
            }
            DatabaseDriver::Mysql => {
                delete_by_token_mysql(self.pool.as_mysql().unwrap(), token).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_sqlite(pool: &SqlitePool, token: &AccessToken) -> Result<AccessToken> {
    let result = sqlx::query(
        r#"
        INSERT INTO access_tokens (token, user_id, created_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&token.token)
    .bind(token.user_id)
    .bind(token.created_at)
    .execute(pool)
    .await
    .context("Failed to create access token")?;

    let mut created = token.clone();
    created.id = result.last_insert_rowid();
    Ok(created)
}

async fn get_by_token_sqlite(pool: &SqlitePool, token: &str) -> Result<Option<AccessToken>> {
    let row = sqlx::query(
        r#"
        SELECT id, token, user_id, created_at
        FROM access_tokens
        WHERE token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await
    .context("Failed to get access token")?;

    Ok(row.map(|r| row_to_token(&r)))
}

async fn get_by_user_sqlite(pool: &SqlitePool, user_id: i64) -> Result<Option<AccessToken>> {
    let row = sqlx::query(
        r#"
        SELECT id, token, user_id, created_at
        FROM access_tokens
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("Failed to get access token by user")?;

    Ok(row.map(|r| row_to_token(&r)))
}

async fn delete_by_token_sqlite(pool: &SqlitePool, token: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM access_tokens WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await
        .context("Failed to delete access token")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_token(row: &sqlx::sqlite::SqliteRow) -> AccessToken {
    AccessToken {
        id: row.get("id"),
        token: row.get("token"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_mysql(pool: &MySqlPool, token: &AccessToken) -> Result<AccessToken> {
    let result = sqlx::query(
        r#"
        INSERT INTO access_tokens (token, user_id, created_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&token.token)
    .bind(token.user_id)
    .bind(token.created_at)
    .execute(pool)
    .await
    .context("Failed to create access token")?;

    let mut created = token.clone();
    created.id = result.last_insert_id() as i64;
    Ok(created)
}

async fn get_by_token_mysql(pool: &MySqlPool, token: &str) -> Result<Option<AccessToken>> {
    let row = sqlx::query(
        r#"
        SELECT id, token, user_id, created_at
        FROM access_tokens
        WHERE token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await
    .context("Failed to get access token")?;

    Ok(row.map(|r| row_to_token_mysql(&r)))
}

async fn get_by_user_mysql(pool: &MySqlPool, user_id: i64) -> Result<Option<AccessToken>> {
    let row = sqlx::query(
        r#"
        SELECT id, token, user_id, created_at
        FROM access_tokens
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("Failed to get access token by user")?;

    Ok(row.map(|r| row_to_token_mysql(&r)))
}

async fn delete_by_token_mysql(pool: &MySqlPool, token: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM access_tokens WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await
        .context("Failed to delete access token")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_token_mysql(row: &sqlx::mysql::MySqlRow) -> AccessToken {
    AccessToken {
        id: row.get("id"),
        token: row.get("token"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}
