/// Database access layer
///
/// One repository module per entity; all queries are parameterized and
/// return `sqlx::Error`, which the service layer maps to domain errors.
pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod post_repo;
pub mod user_repo;
