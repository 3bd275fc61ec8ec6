/// Data models for blog-service
///
/// Raw entities mirror table rows and stay internal to the service; the
/// `*Detail` read models are produced by joining with `users` so responses
/// carry author handles instead of raw identifiers.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user. Never serialized directly; responses only ever expose
/// the handle (`username`).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Post row as stored. `group_id` is cleared (not cascaded) when the group
/// is deleted; `image_url` is an attachment reference only.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub text: String,
    pub image_url: Option<String>,
    pub pub_date: DateTime<Utc>,
}

/// Post representation: `{id, text, author, pub_date}` with the author
/// resolved to their handle.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostDetail {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub pub_date: DateTime<Utc>,
}

/// Comment row as stored. Deleting the parent post cascades here.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Comment representation: `{id, author, post, text, created}`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CommentDetail {
    pub id: Uuid,
    pub author: String,
    pub post: Uuid,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Community a post may belong to. `slug` is not unique in the current
/// schema.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Follow edge as stored. At most one row per (follower, following) pair,
/// enforced by a unique index.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub following_id: Uuid,
}

/// Follow representation: `{id, user, following}` with both endpoints as
/// handles. `user` is the follower, matching the wire contract.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FollowDetail {
    pub id: Uuid,
    pub user: String,
    pub following: String,
}
