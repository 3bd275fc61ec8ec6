/// Group handlers - HTTP endpoints for group operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::services::GroupService;

use super::PaginationParams;

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// List groups. Public.
pub async fn list_groups(
    pool: web::Data<PgPool>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let service = GroupService::new((**pool).clone());
    let groups = service.list_groups(query.limit, query.offset).await?;

    Ok(HttpResponse::Ok().json(groups))
}

/// Create a new group
pub async fn create_group(
    pool: web::Data<PgPool>,
    _user: AuthUser,
    req: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse> {
    let service = GroupService::new((**pool).clone());
    let group = service
        .create_group(&req.title, req.slug.as_deref(), req.description.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(group))
}

/// Get a group by ID. Public.
pub async fn get_group(pool: web::Data<PgPool>, group_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = GroupService::new((**pool).clone());
    let group = service.get_group(*group_id).await?;

    Ok(HttpResponse::Ok().json(group))
}
