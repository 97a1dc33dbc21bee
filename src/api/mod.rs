//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP endpoints of the quill backend:
//! - Token exchange endpoints (login/logout)
//! - Article endpoints
//! - Comment endpoints
//!
//! Routes that mutate state sit behind the authorization gate; the public
//! read surface (article index/show, comment index) and login are exempt.

pub mod articles;
pub mod auth;
pub mod comments;
pub mod documents;
pub mod errors;
pub mod middleware;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{AppState, AuthenticatedUser};

/// Build the API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Protected routes (need a resolved user)
    let protected_routes = Router::new()
        .route("/logout", delete(auth::logout))
        .route("/articles", post(articles::create_article))
        .route(
            "/articles/{id}",
            put(articles::update_article)
                .patch(articles::update_article)
                .delete(articles::delete_article),
        )
        .route("/articles/{id}/comments", post(comments::create_comment))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // Public routes
    Router::new()
        .route("/login", post(auth::login))
        .route("/articles", get(articles::list_articles))
        .route("/articles/{id}", get(articles::get_article))
        .route("/articles/{id}/comments", get(comments::list_comments))
        .merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            cors_origin
                .parse::<HeaderValue>()
                .unwrap_or_else(|_| HeaderValue::from_static("*")),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(build_api_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
