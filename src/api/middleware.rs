//! API middleware
//!
//! Contains the shared application state and the authorization gate:
//! requests on protected routes must carry a bearer token that resolves to
//! a user, otherwise they are rejected with the forbidden error document.
//! The resolved user travels in request extensions as an explicit context
//! value; there is no global current user.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::api::errors::{internal_error, ErrorDocument};
use crate::config::PageConfig;
use crate::models::User;
use crate::services::{ArticleService, AuthService, Authenticator, CommentService};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub auth_service: Arc<AuthService>,
    pub article_service: Arc<ArticleService>,
    pub comment_service: Arc<CommentService>,
    pub comment_repo: Arc<dyn crate::db::repositories::CommentRepository>,
    pub page_config: PageConfig,
}

/// Authenticated user extracted from the request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Extract the raw Authorization header value from a request
pub fn authorization_header(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Authorization gate for protected routes.
///
/// A request without a resolvable user gets the same 403 document whether
/// the header is missing, malformed, or carries an unknown token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ErrorDocument> {
    let header = authorization_header(&request).map(str::to_owned);

    let user = state
        .authenticator
        .authenticate(header.as_deref())
        .await
        .map_err(internal_error)?
        .ok_or_else(ErrorDocument::forbidden)?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}
