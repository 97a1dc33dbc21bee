//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity
///
/// A comment always belongs to an existing article and to the
/// authenticated user who posted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier
    pub id: i64,
    /// Comment body
    pub content: String,
    /// Parent article ID
    pub article_id: i64,
    /// Authoring user ID
    pub user_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Attribute set for creating a comment, deserialized from the
/// `data.attributes` object of a JSON:API request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentAttributes {
    /// Comment body
    pub content: Option<String>,
}

impl CommentAttributes {
    /// Create a populated attribute set
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }
}
