//! Authentication API endpoints
//!
//! Handles HTTP requests for token exchange:
//! - POST /login - exchange an authentication code for an access token
//! - DELETE /logout - invalidate the current access token

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

use crate::api::documents::{access_token_resource, Document};
use crate::api::errors::{internal_error, ErrorDocument};
use crate::api::middleware::{AppState, AuthenticatedUser};
use crate::services::AuthServiceError;

/// Request body for the login exchange
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// POST /login - exchange a code for an access token
///
/// The upstream credential exchange is out of scope; a missing, blank, or
/// unknown code is a 401 authentication error.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ErrorDocument> {
    let code = body.code.unwrap_or_default();

    let token = state
        .auth_service
        .exchange_code(&code)
        .await
        .map_err(|e| match e {
            AuthServiceError::InvalidCode => ErrorDocument::authentication(),
            AuthServiceError::InternalError(err) => internal_error(err),
        })?;

    Ok((
        StatusCode::CREATED,
        Document::one(access_token_resource(&token)),
    ))
}

/// DELETE /logout - invalidate the current access token
///
/// Runs behind the authorization gate, so the header is known to carry a
/// valid token; revoking it ends the session.
pub async fn logout(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    request: axum::extract::Request,
) -> Result<impl IntoResponse, ErrorDocument> {
    let token = crate::api::middleware::authorization_header(&request)
        .map(|h| h.strip_prefix("Bearer ").unwrap_or(h).to_string())
        .unwrap_or_default();

    state
        .auth_service
        .revoke(&token)
        .await
        .map_err(internal_error)?;

    tracing::info!(user_id = user.id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}
