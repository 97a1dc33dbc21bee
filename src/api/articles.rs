//! Article API endpoints
//!
//! Handles HTTP requests for article management:
//! - GET /articles - list articles with pagination, newest first
//! - GET /articles/{id} - get a single article
//! - POST /articles - create a new article (requires auth)
//! - PUT|PATCH /articles/{id} - update an article (requires auth + ownership)
//! - DELETE /articles/{id} - delete an article (requires auth + ownership)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::api::documents::{article_resource, Document, DocumentBody};
use crate::api::errors::{internal_error, ErrorDocument};
use crate::api::middleware::{AppState, AuthenticatedUser};
use crate::models::{Article, ArticleAttributes, PageParams, PageQuery};
use crate::services::ArticleServiceError;

/// Map service failures to error documents
fn map_error(err: ArticleServiceError) -> ErrorDocument {
    match err {
        ArticleServiceError::NotFound(_) => ErrorDocument::not_found("Article"),
        ArticleServiceError::Validation(errors) => ErrorDocument::validation(&errors),
        ArticleServiceError::InternalError(err) => internal_error(err),
    }
}

/// Serialize an article together with its comment linkage
async fn render_article(state: &AppState, article: &Article) -> Result<Document, ErrorDocument> {
    let comment_ids = state
        .comment_repo
        .ids_by_article(article.id)
        .await
        .map_err(internal_error)?;
    Ok(Document::one(article_resource(article, &comment_ids)))
}

/// GET /articles - paginated list, newest first
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ErrorDocument> {
    let page = PageParams::from_query(
        &query,
        state.page_config.default_size,
        state.page_config.max_size,
    );

    let articles = state.article_service.list(page).await.map_err(map_error)?;

    let mut resources = Vec::with_capacity(articles.len());
    for article in &articles {
        let comment_ids = state
            .comment_repo
            .ids_by_article(article.id)
            .await
            .map_err(internal_error)?;
        resources.push(article_resource(article, &comment_ids));
    }

    Ok(Document::many(resources))
}

/// GET /articles/{id} - single article
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ErrorDocument> {
    let article = state.article_service.get(id).await.map_err(map_error)?;
    render_article(&state, &article).await
}

/// POST /articles - create (requires auth)
pub async fn create_article(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Json(body): Json<DocumentBody<ArticleAttributes>>,
) -> Result<impl IntoResponse, ErrorDocument> {
    let article = state
        .article_service
        .create(user.id, body.into_attributes())
        .await
        .map_err(map_error)?;

    let document = render_article(&state, &article).await?;
    Ok((StatusCode::CREATED, document))
}

/// PUT|PATCH /articles/{id} - update (requires auth + ownership)
pub async fn update_article(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(body): Json<DocumentBody<ArticleAttributes>>,
) -> Result<impl IntoResponse, ErrorDocument> {
    let article = state.article_service.get(id).await.map_err(map_error)?;

    if article.user_id != user.id {
        return Err(ErrorDocument::forbidden());
    }

    let updated = state
        .article_service
        .update(article, body.into_attributes())
        .await
        .map_err(map_error)?;

    render_article(&state, &updated).await
}

/// DELETE /articles/{id} - delete (requires auth + ownership); 204 empty body
pub async fn delete_article(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ErrorDocument> {
    let article = state.article_service.get(id).await.map_err(map_error)?;

    if article.user_id != user.id {
        return Err(ErrorDocument::forbidden());
    }

    state
        .article_service
        .delete(article.id)
        .await
        .map_err(map_error)?;

    Ok(StatusCode::NO_CONTENT)
}
