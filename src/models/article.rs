//! Article model
//!
//! This module provides:
//! - `Article` entity representing a blog article
//! - `ArticleAttributes`, the typed attribute set accepted at the API
//!   boundary for both create and update requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier
    pub id: i64,
    /// Article title
    pub title: String,
    /// Article body
    pub content: String,
    /// URL-friendly slug (unique)
    pub slug: String,
    /// Owning user ID
    pub user_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Create a new article owned by the given user.
    pub fn new(title: String, content: String, slug: String, user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the database
            title,
            content,
            slug,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Attribute set for creating or updating an article.
///
/// Deserialized from the `data.attributes` object of a JSON:API request
/// body. On create, absent fields fail presence validation; on update,
/// absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleAttributes {
    /// New title
    pub title: Option<String>,
    /// New body
    pub content: Option<String>,
    /// New slug
    pub slug: Option<String>,
}

impl ArticleAttributes {
    /// Create a fully populated attribute set
    pub fn new(title: impl Into<String>, content: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            slug: Some(slug.into()),
        }
    }

    /// Check if any field is set
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.content.is_some() || self.slug.is_some()
    }
}
