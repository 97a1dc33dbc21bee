//! Quill - a small JSON:API blogging backend

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{
            SqlxAccessTokenRepository, SqlxArticleRepository, SqlxCommentRepository,
            SqlxUserRepository,
        },
    },
    services::{ArticleService, AuthService, Authenticator, CommentService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting quill backend...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Create repositories
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let token_repo = SqlxAccessTokenRepository::boxed(pool.clone());
    let article_repo = SqlxArticleRepository::boxed(pool.clone());
    let comment_repo = SqlxCommentRepository::boxed(pool.clone());

    // Initialize services
    let authenticator = Arc::new(Authenticator::new(token_repo.clone(), user_repo.clone()));
    let auth_service = Arc::new(AuthService::new(user_repo.clone(), token_repo.clone()));
    let article_service = Arc::new(ArticleService::new(article_repo.clone()));
    let comment_service = Arc::new(CommentService::new(comment_repo.clone(), article_repo));

    // Build application state
    let state = AppState {
        authenticator,
        auth_service,
        article_service,
        comment_service,
        comment_repo,
        page_config: config.page,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
