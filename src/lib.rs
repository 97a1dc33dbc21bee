//! Quill - a small JSON:API blogging backend
//!
//! This library provides the core functionality for the quill backend:
//! bearer-token authentication, article CRUD with ownership checks, and
//! paginated article comments, all spoken in JSON:API.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
