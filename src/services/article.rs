//! Article service
//!
//! Implements business logic for article management:
//! - Create, read, update, delete articles
//! - Field-level validation (presence, slug format, slug uniqueness)
//! - Paginated listing, newest first
//!
//! Validation failures are returned as a structured list of field errors
//! rather than an exception, so the API layer can emit one JSON:API error
//! entry per offending attribute.

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::db::repositories::ArticleRepository;
use crate::models::{Article, ArticleAttributes, PageParams};
use crate::services::FieldError;

/// Slug format: lowercase alphanumeric runs separated by single hyphens
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug regex is valid"));

/// Error types for article service operations
#[derive(Debug, thiserror::Error)]
pub enum ArticleServiceError {
    /// Article not found
    #[error("Article not found: {0}")]
    NotFound(i64),

    /// One or more attributes failed validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Article service for managing blog articles
pub struct ArticleService {
    repo: Arc<dyn ArticleRepository>,
}

impl ArticleService {
    /// Create a new article service
    pub fn new(repo: Arc<dyn ArticleRepository>) -> Self {
        Self { repo }
    }

    /// List articles, newest first, bounded by the page window.
    ///
    /// Out-of-range pages come back empty rather than failing.
    pub async fn list(&self, page: PageParams) -> Result<Vec<Article>, ArticleServiceError> {
        let articles = self
            .repo
            .list(page.offset(), page.limit())
            .await
            .context("Failed to list articles")?;
        Ok(articles)
    }

    /// Get a single article by id
    pub async fn get(&self, id: i64) -> Result<Article, ArticleServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .context("Failed to load article")?
            .ok_or(ArticleServiceError::NotFound(id))
    }

    /// Create a new article owned by the given user.
    ///
    /// # Errors
    ///
    /// - `Validation` with one entry per blank/invalid/duplicate attribute
    /// - `InternalError` for database errors
    pub async fn create(
        &self,
        user_id: i64,
        attrs: ArticleAttributes,
    ) -> Result<Article, ArticleServiceError> {
        let mut errors = Vec::new();

        let title = require_present("title", attrs.title.as_deref(), &mut errors);
        let content = require_present("content", attrs.content.as_deref(), &mut errors);
        let slug = require_present("slug", attrs.slug.as_deref(), &mut errors);

        if let Some(slug) = slug {
            self.check_slug(slug, None, &mut errors).await?;
        }

        if !errors.is_empty() {
            return Err(ArticleServiceError::Validation(errors));
        }

        // All three are Some once errors is empty
        let article = Article::new(
            title.unwrap_or_default().to_string(),
            content.unwrap_or_default().to_string(),
            slug.unwrap_or_default().to_string(),
            user_id,
        );

        let created = self
            .repo
            .create(&article)
            .await
            .context("Failed to create article")?;

        tracing::info!(article_id = created.id, slug = %created.slug, "Article created");
        Ok(created)
    }

    /// Apply the provided attributes to an existing article.
    ///
    /// Absent attributes are left unchanged; present ones must pass the same
    /// validation as on create.
    pub async fn update(
        &self,
        mut article: Article,
        attrs: ArticleAttributes,
    ) -> Result<Article, ArticleServiceError> {
        let mut errors = Vec::new();

        if let Some(ref title) = attrs.title {
            if title.trim().is_empty() {
                errors.push(FieldError::blank("title"));
            }
        }
        if let Some(ref content) = attrs.content {
            if content.trim().is_empty() {
                errors.push(FieldError::blank("content"));
            }
        }
        if let Some(ref slug) = attrs.slug {
            if slug.trim().is_empty() {
                errors.push(FieldError::blank("slug"));
            } else {
                self.check_slug(slug, Some(article.id), &mut errors).await?;
            }
        }

        if !errors.is_empty() {
            return Err(ArticleServiceError::Validation(errors));
        }

        if let Some(title) = attrs.title {
            article.title = title;
        }
        if let Some(content) = attrs.content {
            article.content = content;
        }
        if let Some(slug) = attrs.slug {
            article.slug = slug;
        }

        let updated = self
            .repo
            .update(&article)
            .await
            .context("Failed to update article")?;
        Ok(updated)
    }

    /// Delete an article by id
    pub async fn delete(&self, id: i64) -> Result<(), ArticleServiceError> {
        let removed = self
            .repo
            .delete(id)
            .await
            .context("Failed to delete article")?;
        if !removed {
            return Err(ArticleServiceError::NotFound(id));
        }
        tracing::info!(article_id = id, "Article deleted");
        Ok(())
    }

    /// Validate slug format and uniqueness, skipping the article being
    /// updated when checking for collisions.
    async fn check_slug(
        &self,
        slug: &str,
        exclude_id: Option<i64>,
        errors: &mut Vec<FieldError>,
    ) -> Result<(), ArticleServiceError> {
        if !SLUG_RE.is_match(slug) {
            errors.push(FieldError::new("slug", "is invalid"));
            return Ok(());
        }

        let existing = self
            .repo
            .get_by_slug(slug)
            .await
            .context("Failed to check slug uniqueness")?;
        if let Some(existing) = existing {
            if Some(existing.id) != exclude_id {
                errors.push(FieldError::taken("slug"));
            }
        }
        Ok(())
    }
}

/// Presence check shared by the create path
fn require_present<'a>(
    field: &str,
    value: Option<&'a str>,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.push(FieldError::blank(field));
            None
        }
    }
}
