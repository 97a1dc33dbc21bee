//! Comment repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Comment;

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Create a new comment
    async fn create(&self, comment: &Comment) -> Result<Comment>;

    /// List comments for an article in insertion order
    async fn list_by_article(&self, article_id: i64, offset: i64, limit: i64)
        -> Result<Vec<Comment>>;

    /// Get the ids of all comments on an article, in insertion order
    async fn ids_by_article(&self, article_id: i64) -> Result<Vec<i64>>;

    /// Total number of comments
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based comment repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxCommentRepository {
    pool: DynDatabasePool,
}

impl SqlxCommentRepository {
    /// Create a new SQLx comment repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a shared repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn CommentRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<Comment> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_sqlite(self.pool.as_sqlite().unwrap(), comment).await,
            DatabaseDriver::Mysql => create_mysql(self.pool.as_mysql().unwrap(), comment).await,
        }
    }

    async fn list_by_article(
        &self,
        article_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_by_article_sqlite(self.pool.as_sqlite().unwrap(), article_id, offset, limit)
                    .await
            }
            DatabaseDriver::Mysql => {
                list_by_article_mysql(self.pool.as_mysql().unwrap(), article_id, offset, limit)
                    .await
            }
        }
    }

    async fn ids_by_article(&self, article_id: i64) -> Result<Vec<i64>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                ids_by_article_sqlite(self.pool.as_sqlite().unwrap(), article_id).await
            }
            DatabaseDriver::Mysql => {
                ids_by_article_mysql(self.pool.as_mysql().unwrap(), article_id).await
            }
        }
    }

    async fn count(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => count_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => count_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_sqlite(pool: &SqlitePool, comment: &Comment) -> Result<Comment> {
    let result = sqlx::query(
        r#"
        INSERT INTO comments (content, article_id, user_id, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&comment.content)
    .bind(comment.article_id)
    .bind(comment.user_id)
    .bind(comment.created_at)
    .execute(pool)
    .await
    .context("Failed to create comment")?;

    let mut created = comment.clone();
    created.id = result.last_insert_rowid();
    Ok(created)
}

async fn list_by_article_sqlite(
    pool: &SqlitePool,
    article_id: i64,
    offset: i64,
    limit: i64,
) -> Result<Vec<Comment>> {
    let rows = sqlx::query(
        r#"
        SELECT id, content, article_id, user_id, created_at
        FROM comments
        WHERE article_id = ?
        ORDER BY created_at ASC, id ASC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(article_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list comments")?;

    Ok(rows.iter().map(row_to_comment).collect())
}

async fn ids_by_article_sqlite(pool: &SqlitePool, article_id: i64) -> Result<Vec<i64>> {
    let ids: Vec<i64> = sqlx::query_scalar(
        r#"
        SELECT id FROM comments
        WHERE article_id = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
    .context("Failed to list comment ids")?;

    Ok(ids)
}

async fn count_sqlite(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(pool)
        .await
        .context("Failed to count comments")?;
    Ok(count)
}

fn row_to_comment(row: &sqlx::sqlite::SqliteRow) -> Comment {
    Comment {
        id: row.get("id"),
        content: row.get("content"),
        article_id: row.get("article_id"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_mysql(pool: &MySqlPool, comment: &Comment) -> Result<Comment> {
    let result = sqlx::query(
        r#"
        INSERT INTO comments (content, article_id, user_id, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&comment.content)
    .bind(comment.article_id)
    .bind(comment.user_id)
    .bind(comment.created_at)
    .execute(pool)
    .await
    .context("Failed to create comment")?;

    let mut created = comment.clone();
    created.id = result.last_insert_id() as i64;
    Ok(created)
}

async fn list_by_article_mysql(
    pool: &MySqlPool,
    article_id: i64,
    offset: i64,
    limit: i64,
) -> Result<Vec<Comment>> {
    let rows = sqlx::query(
        r#"
        SELECT id, content, article_id, user_id, created_at
        FROM comments
        WHERE article_id = ?
        ORDER BY created_at ASC, id ASC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(article_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .context("Failed to list comments")?;

    Ok(rows.iter().map(row_to_comment_mysql).collect())
}

async fn ids_by_article_mysql(pool: &MySqlPool, article_id: i64) -> Result<Vec<i64>> {
    let ids: Vec<i64> = sqlx::query_scalar(
        r#"
        SELECT id FROM comments
        WHERE article_id = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
    .context("Failed to list comment ids")?;

    Ok(ids)
}

async fn count_mysql(pool: &MySqlPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(pool)
        .await
        .context("Failed to count comments")?;
    Ok(count)
}

fn row_to_comment_mysql(row: &sqlx::mysql::MySqlRow) -> Comment {
    Comment {
        id: row.get("id"),
        content: row.get("content"),
        article_id: row.get("article_id"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}
