//! JSON:API documents
//!
//! Success responses are JSON:API documents: a top-level `data` holding one
//! resource object or an array of them. Resource objects carry a string
//! `id`, a `type`, the entity-specific `attributes` subset, and
//! `relationships` as resource identifiers only (no embedded bodies).

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

use crate::models::{AccessToken, Article, Comment, User};

/// Reference to a related resource by id and type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResourceIdentifier {
    fn new(id: i64, kind: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Linkage data of a relationship
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

/// A named relationship entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub data: RelationshipData,
}

/// A JSON:API resource object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceObject {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<BTreeMap<String, Relationship>>,
}

/// Top-level primary data: a single resource or a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    One(ResourceObject),
    Many(Vec<ResourceObject>),
}

/// A JSON:API document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub data: PrimaryData,
}

impl Document {
    /// Document with a single resource
    pub fn one(resource: ResourceObject) -> Self {
        Self {
            data: PrimaryData::One(resource),
        }
    }

    /// Document with a resource collection
    pub fn many(resources: Vec<ResourceObject>) -> Self {
        Self {
            data: PrimaryData::Many(resources),
        }
    }
}

impl IntoResponse for Document {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Serialize an article with its comment linkage
pub fn article_resource(article: &Article, comment_ids: &[i64]) -> ResourceObject {
    let comments = comment_ids
        .iter()
        .map(|id| ResourceIdentifier::new(*id, "comments"))
        .collect();

    let mut relationships = BTreeMap::new();
    relationships.insert(
        "comments".to_string(),
        Relationship {
            data: RelationshipData::Many(comments),
        },
    );

    ResourceObject {
        id: article.id.to_string(),
        kind: "articles".to_string(),
        attributes: json!({
            "title": article.title,
            "content": article.content,
            "slug": article.slug,
        }),
        relationships: Some(relationships),
    }
}

/// Serialize a comment with its article and user linkage
pub fn comment_resource(comment: &Comment) -> ResourceObject {
    let mut relationships = BTreeMap::new();
    relationships.insert(
        "article".to_string(),
        Relationship {
            data: RelationshipData::One(ResourceIdentifier::new(comment.article_id, "articles")),
        },
    );
    relationships.insert(
        "user".to_string(),
        Relationship {
            data: RelationshipData::One(ResourceIdentifier::new(comment.user_id, "users")),
        },
    );

    ResourceObject {
        id: comment.id.to_string(),
        kind: "comments".to_string(),
        attributes: json!({
            "content": comment.content,
        }),
        relationships: Some(relationships),
    }
}

/// Serialize a user profile
pub fn user_resource(user: &User) -> ResourceObject {
    ResourceObject {
        id: user.id.to_string(),
        kind: "users".to_string(),
        attributes: json!({
            "login": user.login,
            "name": user.name,
            "url": user.url,
            "avatar_url": user.avatar_url,
        }),
        relationships: None,
    }
}

/// Serialize an access token for the login response
pub fn access_token_resource(token: &AccessToken) -> ResourceObject {
    ResourceObject {
        id: token.id.to_string(),
        kind: "access_tokens".to_string(),
        attributes: json!({
            "token": token.token,
        }),
        relationships: None,
    }
}

// ============================================================================
// Request bodies
// ============================================================================

/// JSON:API request body: `{ "data": { "attributes": { ... } } }`
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentBody<T> {
    pub data: ResourceBody<T>,
}

/// The `data` member of a request body
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceBody<T> {
    pub attributes: Option<T>,
}

impl<T: Default> DocumentBody<T> {
    /// Unwrap down to the attribute struct; a missing `attributes` member
    /// behaves like an empty one and fails presence validation downstream
    pub fn into_attributes(self) -> T {
        self.data.attributes.unwrap_or_default()
    }
}
