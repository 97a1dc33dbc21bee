//! Comment service
//!
//! Paginated comment listing and creation against an existing article.
//! The parent article is loaded first so a dangling `article_id` surfaces
//! as `ArticleNotFound` instead of an FK failure from the store.

use anyhow::Context;
use chrono::Utc;
use std::sync::Arc;

use crate::db::repositories::{ArticleRepository, CommentRepository};
use crate::models::{Comment, CommentAttributes, PageParams};
use crate::services::FieldError;

/// Error types for comment service operations
#[derive(Debug, thiserror::Error)]
pub enum CommentServiceError {
    /// Parent article does not exist
    #[error("Article not found: {0}")]
    ArticleNotFound(i64),

    /// One or more attributes failed validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Comment service for article comments
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
    article_repo: Arc<dyn ArticleRepository>,
}

impl CommentService {
    /// Create a new comment service
    pub fn new(
        repo: Arc<dyn CommentRepository>,
        article_repo: Arc<dyn ArticleRepository>,
    ) -> Self {
        Self { repo, article_repo }
    }

    /// List an article's comments in insertion order, bounded by the page
    /// window. Out-of-range pages come back empty.
    pub async fn list_for_article(
        &self,
        article_id: i64,
        page: PageParams,
    ) -> Result<Vec<Comment>, CommentServiceError> {
        self.require_article(article_id).await?;

        let comments = self
            .repo
            .list_by_article(article_id, page.offset(), page.limit())
            .await
            .context("Failed to list comments")?;
        Ok(comments)
    }

    /// Create a comment on an article as the given user.
    ///
    /// # Errors
    ///
    /// - `ArticleNotFound` if the parent article does not exist
    /// - `Validation` if the content is missing or blank
    /// - `InternalError` for database errors
    pub async fn create(
        &self,
        article_id: i64,
        user_id: i64,
        attrs: CommentAttributes,
    ) -> Result<Comment, CommentServiceError> {
        self.require_article(article_id).await?;

        let content = match attrs.content {
            Some(ref content) if !content.trim().is_empty() => content.clone(),
            _ => {
                return Err(CommentServiceError::Validation(vec![FieldError::blank(
                    "content",
                )]))
            }
        };

        let comment = Comment {
            id: 0,
            content,
            article_id,
            user_id,
            created_at: Utc::now(),
        };

        let created = self
            .repo
            .create(&comment)
            .await
            .context("Failed to create comment")?;

        tracing::info!(comment_id = created.id, article_id, "Comment created");
        Ok(created)
    }

    async fn require_article(&self, article_id: i64) -> Result<(), CommentServiceError> {
        let exists = self
            .article_repo
            .get_by_id(article_id)
            .await
            .context("Failed to load parent article")?
            .is_some();
        if !exists {
            return Err(CommentServiceError::ArticleNotFound(article_id));
        }
        Ok(())
    }
}
