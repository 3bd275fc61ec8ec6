/// Comment handlers - nested under /posts/{post_id}/comments
///
/// All comment routes require authentication. The request body only ever
/// carries text; author and post come from the request context and path,
/// so client-supplied values for them cannot exist.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::services::CommentService;

use super::PaginationParams;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// List comments for a post, newest first
pub async fn list_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    _user: AuthUser,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comments = service
        .list_comments(*post_id, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Create a comment under a post
pub async fn create_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user: AuthUser,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service.create_comment(*post_id, user.id, &req.text).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Get a single comment
pub async fn get_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    _user: AuthUser,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());
    let comment = service.get_comment(post_id, comment_id).await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Update a comment (PUT and PATCH). Author only.
pub async fn update_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user: AuthUser,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());
    let comment = service
        .update_comment(post_id, comment_id, user.id, &req.text)
        .await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Delete a comment. Author only.
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user: AuthUser,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());
    service.delete_comment(post_id, comment_id, user.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
