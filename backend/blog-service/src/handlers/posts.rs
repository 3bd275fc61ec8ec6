/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::services::posts::PostChanges;
use crate::services::PostService;

use super::default_limit;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
    pub group: Option<Uuid>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub text: Option<String>,
    pub group: Option<Uuid>,
    pub image: Option<String>,
}

/// List query: optional group narrowing plus pagination
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub group: Option<Uuid>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// List posts, optionally filtered by group. Public.
pub async fn list_posts(
    pool: web::Data<PgPool>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service
        .list_posts(query.group, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Create a new post authored by the requester
pub async fn create_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(user.id, &req.text, req.group, req.image.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID. Public.
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.get_post(*post_id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Update a post (PUT and PATCH). Author only.
pub async fn update_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user: AuthUser,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service
        .update_post(
            *post_id,
            user.id,
            PostChanges {
                text: req.text.as_deref(),
                group: req.group,
                image_url: req.image.as_deref(),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post. Author only.
pub async fn delete_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user: AuthUser,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete_post(*post_id, user.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
