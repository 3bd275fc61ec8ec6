/// Blog Service Library
///
/// HTTP backend for a small blog platform: posts (optionally grouped into
/// communities), per-post comments, and follow relationships between users.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and request/response DTOs
/// - `models`: Data structures for users, posts, comments, groups, follows
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `middleware`: Bearer-token authentication middleware and extractors
/// - `policy`: Ownership and authorization predicates
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
