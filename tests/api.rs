//! End-to-end API tests
//!
//! Drives the full router over an in-memory SQLite database: login exchange,
//! the authorization gate, article CRUD with ownership, paginated comments,
//! and the JSON:API error bodies.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use quill::{
    api::{build_router, AppState},
    config::PageConfig,
    db::repositories::{
        AccessTokenRepository, ArticleRepository, CommentRepository, SqlxAccessTokenRepository,
        SqlxArticleRepository, SqlxCommentRepository, SqlxUserRepository, UserRepository,
    },
    db::{create_test_pool, migrations},
    models::{AccessToken, Article, User},
    services::{ArticleService, AuthService, Authenticator, CommentService},
};

struct TestContext {
    server: TestServer,
    article_repo: Arc<dyn ArticleRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    user: User,
    token: String,
    other_user: User,
    other_token: String,
}

async fn setup() -> TestContext {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let token_repo = SqlxAccessTokenRepository::boxed(pool.clone());
    let article_repo = SqlxArticleRepository::boxed(pool.clone());
    let comment_repo = SqlxCommentRepository::boxed(pool.clone());

    let user = user_repo
        .create(&User::new("jsmith".to_string(), "github".to_string()))
        .await
        .expect("Failed to create user");
    let token = token_repo
        .create(&AccessToken::generate(user.id))
        .await
        .expect("Failed to create token");

    let other_user = user_repo
        .create(&User::new("other".to_string(), "github".to_string()))
        .await
        .expect("Failed to create user");
    let other_token = token_repo
        .create(&AccessToken::generate(other_user.id))
        .await
        .expect("Failed to create token");

    let state = AppState {
        authenticator: Arc::new(Authenticator::new(token_repo.clone(), user_repo.clone())),
        auth_service: Arc::new(AuthService::new(user_repo, token_repo)),
        article_service: Arc::new(ArticleService::new(article_repo.clone())),
        comment_service: Arc::new(CommentService::new(
            comment_repo.clone(),
            article_repo.clone(),
        )),
        comment_repo: comment_repo.clone(),
        page_config: PageConfig::default(),
    };

    let server = TestServer::new(build_router(state, "http://localhost:3000"))
        .expect("Failed to start test server");

    TestContext {
        server,
        article_repo,
        comment_repo,
        user,
        token: token.token,
        other_user,
        other_token: other_token.token,
    }
}

async fn seed_article(ctx: &TestContext, user_id: i64, n: u32) -> Article {
    ctx.article_repo
        .create(&Article::new(
            format!("Title {}", n),
            format!("Content {}", n),
            format!("slug-{}", n),
            user_id,
        ))
        .await
        .expect("Failed to seed article")
}

fn article_body(title: &str, content: &str, slug: &str) -> Value {
    json!({ "data": { "attributes": { "title": title, "content": content, "slug": slug } } })
}

fn forbidden_body() -> Value {
    json!({
        "errors": [{
            "status": "403",
            "source": { "pointer": "/headers/authorization" },
            "title": "Forbidden",
            "detail": "User is not authorized to perform this action."
        }]
    })
}

fn pointers(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|e| e["source"]["pointer"].as_str().unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Login / logout
// ============================================================================

#[tokio::test]
async fn test_login_with_valid_code_returns_token() {
    let ctx = setup().await;

    let response = ctx
        .server
        .post("/login")
        .json(&json!({ "code": "jsmith" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["data"]["type"], "access_tokens");
    // Existing token is returned rather than rotated
    assert_eq!(body["data"]["attributes"]["token"], ctx.token);
}

#[tokio::test]
async fn test_login_with_invalid_code_returns_401_error_body() {
    let ctx = setup().await;

    let response = ctx
        .server
        .post("/login")
        .json(&json!({ "code": "nobody" }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "errors": [{
                "status": "401",
                "source": { "pointer": "/code" },
                "title": "Invalid Authentication Code",
                "detail": "Valid code must be provided in order to be exchanged for token."
            }]
        })
    );
}

#[tokio::test]
async fn test_login_with_missing_code_returns_401() {
    let ctx = setup().await;

    let response = ctx.server.post("/login").json(&json!({})).await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let ctx = setup().await;

    let response = ctx
        .server
        .delete("/logout")
        .authorization_bearer(&ctx.token)
        .await;
    assert_eq!(response.status_code(), 204);
    assert!(response.text().is_empty());

    // The revoked token no longer passes the gate
    let response = ctx
        .server
        .post("/articles")
        .authorization_bearer(&ctx.token)
        .json(&article_body("T", "C", "t"))
        .await;
    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_logout_without_token_is_forbidden() {
    let ctx = setup().await;

    let response = ctx.server.delete("/logout").await;
    assert_eq!(response.status_code(), 403);
}

// ============================================================================
// Articles: public reads
// ============================================================================

#[tokio::test]
async fn test_list_articles_empty() {
    let ctx = setup().await;

    let response = ctx.server.get("/articles").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_list_articles_proper_json_newest_first() {
    let ctx = setup().await;
    let old = seed_article(&ctx, ctx.user.id, 1).await;
    let newer = seed_article(&ctx, ctx.user.id, 2).await;

    let response = ctx.server.get("/articles").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 2);

    assert_eq!(data[0]["id"], newer.id.to_string());
    assert_eq!(data[1]["id"], old.id.to_string());

    assert_eq!(
        data[0]["attributes"],
        json!({ "title": "Title 2", "content": "Content 2", "slug": "slug-2" })
    );
}

#[tokio::test]
async fn test_list_articles_pagination_window() {
    let ctx = setup().await;
    for n in 1..=5 {
        seed_article(&ctx, ctx.user.id, n).await;
    }

    let response = ctx.server.get("/articles?page[number]=2&page[size]=2").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 2);
    // Newest first: page 2 of size 2 holds the third and fourth newest
    assert_eq!(data[0]["attributes"]["slug"], "slug-3");
    assert_eq!(data[1]["attributes"]["slug"], "slug-2");

    // Page past the end is empty, not an error
    let response = ctx.server.get("/articles?page[number]=9&page[size]=2").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_get_article_proper_json() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx.server.get(&format!("/articles/{}", article.id)).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["data"]["id"], article.id.to_string());
    assert_eq!(body["data"]["type"], "articles");
    assert_eq!(
        body["data"]["attributes"],
        json!({ "title": "Title 1", "content": "Content 1", "slug": "slug-1" })
    );
}

#[tokio::test]
async fn test_get_article_includes_comment_relationships() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx
        .server
        .post(&format!("/articles/{}/comments", article.id))
        .authorization_bearer(&ctx.token)
        .json(&json!({ "data": { "attributes": { "content": "First!" } } }))
        .await;
    assert_eq!(response.status_code(), 201);
    let comment: Value = response.json();
    let comment_id = comment["data"]["id"].as_str().unwrap().to_string();

    let response = ctx.server.get(&format!("/articles/{}", article.id)).await;
    let body: Value = response.json();
    assert_eq!(
        body["data"]["relationships"]["comments"]["data"],
        json!([{ "id": comment_id, "type": "comments" }])
    );
}

#[tokio::test]
async fn test_get_missing_article_returns_404() {
    let ctx = setup().await;

    let response = ctx.server.get("/articles/9999").await;
    assert_eq!(response.status_code(), 404);

    let body: Value = response.json();
    assert_eq!(body["errors"][0]["status"], "404");
    assert_eq!(body["errors"][0]["title"], "Not Found");
}

// ============================================================================
// Articles: create
// ============================================================================

#[tokio::test]
async fn test_create_article_without_token_is_forbidden() {
    let ctx = setup().await;

    let response = ctx
        .server
        .post("/articles")
        .json(&article_body("T", "C", "t"))
        .await;

    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(body, forbidden_body());
}

#[tokio::test]
async fn test_create_article_with_invalid_token_is_forbidden() {
    let ctx = setup().await;

    let response = ctx
        .server
        .post("/articles")
        .add_header(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_static("Invalid Token"),
        )
        .json(&article_body("T", "C", "t"))
        .await;

    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(body, forbidden_body());
}

#[tokio::test]
async fn test_create_article_with_blank_attributes_returns_422() {
    let ctx = setup().await;

    let response = ctx
        .server
        .post("/articles")
        .authorization_bearer(&ctx.token)
        .json(&json!({ "data": { "attributes": { "title": "", "content": "" } } }))
        .await;

    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(
        pointers(&body),
        vec![
            "/data/attributes/title",
            "/data/attributes/content",
            "/data/attributes/slug",
        ]
    );
    assert_eq!(body["errors"][0]["detail"], "can't be blank");
}

#[tokio::test]
async fn test_create_article_success() {
    let ctx = setup().await;

    let response = ctx
        .server
        .post("/articles")
        .authorization_bearer(&ctx.token)
        .json(&article_body(
            "Awesome title.",
            "Super content.",
            "awesome-article",
        ))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(
        body["data"]["attributes"],
        json!({
            "title": "Awesome title.",
            "content": "Super content.",
            "slug": "awesome-article"
        })
    );

    let count = ctx.article_repo.count().await.expect("count failed");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_create_article_duplicate_slug_returns_422() {
    let ctx = setup().await;
    seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx
        .server
        .post("/articles")
        .authorization_bearer(&ctx.token)
        .json(&article_body("Other", "Other", "slug-1"))
        .await;

    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(pointers(&body), vec!["/data/attributes/slug"]);
    assert_eq!(body["errors"][0]["detail"], "has already been taken");
}

// ============================================================================
// Articles: update
// ============================================================================

#[tokio::test]
async fn test_update_article_without_token_is_forbidden() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx
        .server
        .put(&format!("/articles/{}", article.id))
        .json(&article_body("X", "Y", "z"))
        .await;

    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_update_article_by_non_owner_is_forbidden_and_unchanged() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx
        .server
        .put(&format!("/articles/{}", article.id))
        .authorization_bearer(&ctx.other_token)
        .json(&article_body("Hijacked", "Hijacked", "hijacked"))
        .await;

    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(body, forbidden_body());

    let unchanged = ctx
        .article_repo
        .get_by_id(article.id)
        .await
        .expect("get failed")
        .expect("article should still exist");
    assert_eq!(unchanged.title, "Title 1");
}

#[tokio::test]
async fn test_update_article_success() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx
        .server
        .patch(&format!("/articles/{}", article.id))
        .authorization_bearer(&ctx.token)
        .json(&json!({ "data": { "attributes": { "title": "Renamed" } } }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["data"]["attributes"]["title"], "Renamed");
    assert_eq!(body["data"]["attributes"]["content"], "Content 1");

    let stored = ctx
        .article_repo
        .get_by_id(article.id)
        .await
        .expect("get failed")
        .expect("article exists");
    assert_eq!(stored.title, "Renamed");
}

#[tokio::test]
async fn test_update_article_blank_attributes_returns_422() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx
        .server
        .put(&format!("/articles/{}", article.id))
        .authorization_bearer(&ctx.token)
        .json(&json!({ "data": { "attributes": { "title": "", "content": "" } } }))
        .await;

    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(
        pointers(&body),
        vec!["/data/attributes/title", "/data/attributes/content"]
    );
}

#[tokio::test]
async fn test_update_missing_article_returns_404() {
    let ctx = setup().await;

    let response = ctx
        .server
        .put("/articles/9999")
        .authorization_bearer(&ctx.token)
        .json(&article_body("X", "Y", "z"))
        .await;

    assert_eq!(response.status_code(), 404);
}

// ============================================================================
// Articles: destroy
// ============================================================================

#[tokio::test]
async fn test_delete_article_by_owner_returns_204_and_removes_it() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;
    assert_eq!(ctx.article_repo.count().await.expect("count failed"), 1);

    let response = ctx
        .server
        .delete(&format!("/articles/{}", article.id))
        .authorization_bearer(&ctx.token)
        .await;

    assert_eq!(response.status_code(), 204);
    assert!(response.text().is_empty());
    assert_eq!(ctx.article_repo.count().await.expect("count failed"), 0);
}

#[tokio::test]
async fn test_delete_article_by_non_owner_is_forbidden() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx
        .server
        .delete(&format!("/articles/{}", article.id))
        .authorization_bearer(&ctx.other_token)
        .await;

    assert_eq!(response.status_code(), 403);
    assert_eq!(ctx.article_repo.count().await.expect("count failed"), 1);
}

#[tokio::test]
async fn test_delete_article_without_token_is_forbidden() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx.server.delete(&format!("/articles/{}", article.id)).await;
    assert_eq!(response.status_code(), 403);
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn test_list_comments_scoped_to_article() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;
    let other_article = seed_article(&ctx, ctx.other_user.id, 2).await;

    ctx.server
        .post(&format!("/articles/{}/comments", article.id))
        .authorization_bearer(&ctx.token)
        .json(&json!({ "data": { "attributes": { "content": "on mine" } } }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    ctx.server
        .post(&format!("/articles/{}/comments", other_article.id))
        .authorization_bearer(&ctx.other_token)
        .json(&json!({ "data": { "attributes": { "content": "elsewhere" } } }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = ctx
        .server
        .get(&format!("/articles/{}/comments", article.id))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["attributes"]["content"], "on mine");
    assert_eq!(
        data[0]["relationships"]["article"]["data"]["id"],
        article.id.to_string()
    );
}

#[tokio::test]
async fn test_list_comments_paginated_in_insertion_order() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    for n in 1..=3 {
        ctx.server
            .post(&format!("/articles/{}/comments", article.id))
            .authorization_bearer(&ctx.token)
            .json(&json!({ "data": { "attributes": { "content": format!("comment {}", n) } } }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let response = ctx
        .server
        .get(&format!(
            "/articles/{}/comments?page[number]=2&page[size]=1",
            article.id
        ))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["attributes"]["content"], "comment 2");
}

#[tokio::test]
async fn test_list_comments_for_missing_article_returns_404() {
    let ctx = setup().await;

    let response = ctx.server.get("/articles/9999/comments").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_create_comment_without_token_is_forbidden() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx
        .server
        .post(&format!("/articles/{}/comments", article.id))
        .json(&json!({ "data": { "attributes": { "content": "anon" } } }))
        .await;

    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(body, forbidden_body());
}

#[tokio::test]
async fn test_create_comment_success_sets_location() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx
        .server
        .post(&format!("/articles/{}/comments", article.id))
        .authorization_bearer(&ctx.token)
        .json(&json!({
            "data": { "attributes": { "content": "My awesome comment for an article." } }
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(
        response.header("location"),
        format!("/articles/{}", article.id)
    );

    let body: Value = response.json();
    assert_eq!(body["data"]["type"], "comments");
    assert_eq!(
        body["data"]["attributes"]["content"],
        "My awesome comment for an article."
    );
    assert_eq!(
        body["data"]["relationships"]["user"]["data"]["id"],
        ctx.user.id.to_string()
    );

    assert_eq!(ctx.comment_repo.count().await.expect("count failed"), 1);
}

#[tokio::test]
async fn test_create_comment_with_empty_content_returns_422() {
    let ctx = setup().await;
    let article = seed_article(&ctx, ctx.user.id, 1).await;

    let response = ctx
        .server
        .post(&format!("/articles/{}/comments", article.id))
        .authorization_bearer(&ctx.token)
        .json(&json!({ "data": { "attributes": { "content": "" } } }))
        .await;

    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(pointers(&body), vec!["/data/attributes/content"]);
    assert_eq!(ctx.comment_repo.count().await.expect("count failed"), 0);
}

#[tokio::test]
async fn test_create_comment_on_missing_article_returns_404() {
    let ctx = setup().await;

    let response = ctx
        .server
        .post("/articles/9999/comments")
        .authorization_bearer(&ctx.token)
        .json(&json!({ "data": { "attributes": { "content": "orphan" } } }))
        .await;

    assert_eq!(response.status_code(), 404);
}
