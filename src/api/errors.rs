//! JSON:API error documents
//!
//! Every failure leaving the API is shaped as a JSON:API `errors` array:
//! entries carry `status`, `source.pointer`, `title`, and `detail`.
//! Validation failures get one entry per offending attribute; the
//! authentication and authorization failures are fixed documents.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::FieldError;

/// A single JSON:API error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorObject {
    /// HTTP status code as a string, per the JSON:API spec
    pub status: String,
    /// Location of the offending part of the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
    /// Short, human-readable summary
    pub title: String,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
}

/// Error source locator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON pointer into the request document or headers
    pub pointer: String,
}

/// Top-level JSON:API error document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

impl ErrorDocument {
    /// 401: the login code could not be exchanged for a token
    pub fn authentication() -> Self {
        Self {
            errors: vec![ErrorObject {
                status: "401".to_string(),
                source: Some(ErrorSource {
                    pointer: "/code".to_string(),
                }),
                title: "Invalid Authentication Code".to_string(),
                detail: "Valid code must be provided in order to be exchanged for token."
                    .to_string(),
            }],
        }
    }

    /// 403: no resolved user, or the user does not own the resource.
    /// Both cases share one document, so ownership is not leaked.
    pub fn forbidden() -> Self {
        Self {
            errors: vec![ErrorObject {
                status: "403".to_string(),
                source: Some(ErrorSource {
                    pointer: "/headers/authorization".to_string(),
                }),
                title: "Forbidden".to_string(),
                detail: "User is not authorized to perform this action.".to_string(),
            }],
        }
    }

    /// 404: the referenced resource does not exist
    pub fn not_found(what: &str) -> Self {
        Self {
            errors: vec![ErrorObject {
                status: "404".to_string(),
                source: None,
                title: "Not Found".to_string(),
                detail: format!("{} not found.", what),
            }],
        }
    }

    /// 422: one entry per invalid attribute, pointer under
    /// `/data/attributes/<field>`
    pub fn validation(errors: &[FieldError]) -> Self {
        Self {
            errors: errors
                .iter()
                .map(|e| ErrorObject {
                    status: "422".to_string(),
                    source: Some(ErrorSource {
                        pointer: format!("/data/attributes/{}", e.field),
                    }),
                    title: "Invalid Attribute".to_string(),
                    detail: e.message.clone(),
                })
                .collect(),
        }
    }

    /// 500: unexpected failure; details stay in the logs
    pub fn internal() -> Self {
        Self {
            errors: vec![ErrorObject {
                status: "500".to_string(),
                source: None,
                title: "Internal Server Error".to_string(),
                detail: "Something went wrong.".to_string(),
            }],
        }
    }

    /// HTTP status derived from the first entry
    fn status_code(&self) -> StatusCode {
        self.errors
            .first()
            .and_then(|e| e.status.parse::<u16>().ok())
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorDocument {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Log an unexpected error and shape it as a 500 document
pub fn internal_error(err: impl std::fmt::Display) -> ErrorDocument {
    tracing::error!("Internal error: {}", err);
    ErrorDocument::internal()
}
