//! Database layer
//!
//! This module provides database abstraction for the quill backend.
//! It supports:
//! - SQLite (default, for single-binary deployment)
//! - MySQL (for larger deployments)
//!
//! The database driver is selected based on configuration. A trait-based
//! abstraction (`DatabasePool`) lets repositories work with either backend
//! without knowing the specific one; all consistency guarantees come from
//! the store itself, the service adds no coordination of its own.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};
