/// Follow handlers - HTTP endpoints for follow edges
///
/// Every follow route requires authentication; the listing is always scoped
/// to edges pointing at the requester ("who follows me").
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::services::FollowService;

#[derive(Debug, Deserialize)]
pub struct CreateFollowRequest {
    pub following: String,
}

#[derive(Debug, Deserialize)]
pub struct ListFollowsQuery {
    /// Exact-match follower handle
    pub search: Option<String>,
}

/// List the requester's followers, optionally narrowed by handle
pub async fn list_follows(
    pool: web::Data<PgPool>,
    user: AuthUser,
    query: web::Query<ListFollowsQuery>,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    let follows = service
        .list_follows(user.id, query.search.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(follows))
}

/// Follow another user by handle
pub async fn create_follow(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreateFollowRequest>,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    let follow = service
        .create_follow(user.id, &user.username, &req.following)
        .await?;

    Ok(HttpResponse::Created().json(follow))
}

/// Unfollow: delete an edge owned by the requester
pub async fn delete_follow(
    pool: web::Data<PgPool>,
    follow_id: web::Path<Uuid>,
    user: AuthUser,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    service.delete_follow(*follow_id, user.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
