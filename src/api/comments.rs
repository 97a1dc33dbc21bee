//! Comment API endpoints
//!
//! Handles HTTP requests for article comments:
//! - GET /articles/{id}/comments - paginated list (no auth)
//! - POST /articles/{id}/comments - create (requires auth)

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};

use crate::api::documents::{comment_resource, Document, DocumentBody};
use crate::api::errors::{internal_error, ErrorDocument};
use crate::api::middleware::{AppState, AuthenticatedUser};
use crate::models::{CommentAttributes, PageParams, PageQuery};
use crate::services::CommentServiceError;

/// Map service failures to error documents
fn map_error(err: CommentServiceError) -> ErrorDocument {
    match err {
        CommentServiceError::ArticleNotFound(_) => ErrorDocument::not_found("Article"),
        CommentServiceError::Validation(errors) => ErrorDocument::validation(&errors),
        CommentServiceError::InternalError(err) => internal_error(err),
    }
}

/// GET /articles/{id}/comments - paginated, insertion order
pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ErrorDocument> {
    let page = PageParams::from_query(
        &query,
        state.page_config.default_size,
        state.page_config.max_size,
    );

    let comments = state
        .comment_service
        .list_for_article(article_id, page)
        .await
        .map_err(map_error)?;

    Ok(Document::many(
        comments.iter().map(comment_resource).collect(),
    ))
}

/// POST /articles/{id}/comments - create (requires auth)
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(article_id): Path<i64>,
    Json(body): Json<DocumentBody<CommentAttributes>>,
) -> Result<impl IntoResponse, ErrorDocument> {
    let comment = state
        .comment_service
        .create(article_id, user.id, body.into_attributes())
        .await
        .map_err(map_error)?;

    let location = format!("/articles/{}", article_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Document::one(comment_resource(&comment)),
    ))
}
