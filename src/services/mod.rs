//! Business logic services
//!
//! Services sit between the HTTP handlers and the repositories:
//! - `Authenticator`: bearer header → user resolution
//! - `AuthService`: token issuance (login) and revocation (logout)
//! - `ArticleService`: article CRUD with field-level validation
//! - `CommentService`: paginated comment listing and creation

pub mod article;
pub mod auth;
pub mod authenticator;
pub mod comment;

pub use article::{ArticleService, ArticleServiceError};
pub use auth::{AuthService, AuthServiceError};
pub use authenticator::Authenticator;
pub use comment::{CommentService, CommentServiceError};

/// A single invalid field with its failure message.
///
/// Validation surfaces as a list of these rather than an exception, so
/// callers can render one JSON:API error entry per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Attribute name as it appears in the request body
    pub field: String,
    /// Human-readable failure message
    pub message: String,
}

impl FieldError {
    /// Create a field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The standard "can't be blank" presence failure
    pub fn blank(field: impl Into<String>) -> Self {
        Self::new(field, "can't be blank")
    }

    /// The standard uniqueness failure
    pub fn taken(field: impl Into<String>) -> Self {
        Self::new(field, "has already been taken")
    }
}
