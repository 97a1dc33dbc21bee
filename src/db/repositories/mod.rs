//! Repository layer
//!
//! Each aggregate gets a repository trait plus a SQLx implementation that
//! works against both SQLite and MySQL. Services depend on the traits only.

pub mod access_token;
pub mod article;
pub mod comment;
pub mod user;

pub use access_token::{AccessTokenRepository, SqlxAccessTokenRepository};
pub use article::{ArticleRepository, SqlxArticleRepository};
pub use comment::{CommentRepository, SqlxCommentRepository};
pub use user::{SqlxUserRepository, UserRepository};
