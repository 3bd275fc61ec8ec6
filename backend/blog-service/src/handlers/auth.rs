/// Authentication handlers - signup and token issuance/refresh
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repo;
use crate::error::{AppError, Result};

const MAX_USERNAME_LENGTH: usize = 150;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Register a new user and hand back a token pair
pub async fn signup(
    pool: web::Data<PgPool>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    validate_username(&req.username)?;

    if !req.email.contains('@') {
        return Err(AppError::validation("email", "Email is invalid"));
    }

    let password_hash = auth_core::password::hash_password(&req.password)?;

    let user = match user_repo::create_user(&pool, &req.username, &req.email, &password_hash).await
    {
        Ok(user) => user,
        Err(err) if AppError::is_unique_violation(&err) => {
            return Err(AppError::Conflict("Username already taken".to_string()))
        }
        Err(err) => return Err(err.into()),
    };

    let pair = auth_core::jwt::generate_token_pair(user.id, &user.username)?;

    Ok(HttpResponse::Created().json(SignupResponse {
        user_id: user.id,
        username: user.username,
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

/// Issue a token pair for valid credentials
pub async fn token(pool: web::Data<PgPool>, req: web::Json<TokenRequest>) -> Result<HttpResponse> {
    let user = user_repo::find_user_by_username(&pool, &req.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    auth_core::password::verify_password(&req.password, &user.password_hash)
        .map_err(|_| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let pair = auth_core::jwt::generate_token_pair(user.id, &user.username)?;

    Ok(HttpResponse::Ok().json(pair))
}

/// Exchange a refresh token for a new pair. The user must still exist.
pub async fn refresh(
    pool: web::Data<PgPool>,
    req: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    let claims = auth_core::jwt::validate_refresh_token(&req.refresh)?;
    let user_id = claims.user_id()?;

    let user = user_repo::find_user_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    let pair = auth_core::jwt::generate_token_pair(user.id, &user.username)?;

    Ok(HttpResponse::Ok().json(pair))
}

fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(AppError::validation("username", "Username is empty"));
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(AppError::validation("username", "Username is too long"));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(AppError::validation(
            "username",
            "Username may only contain letters, digits and _ . -",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("bob_the-2nd.").is_ok());

        assert!(matches!(
            validate_username(""),
            Err(AppError::Validation { field: "username", .. })
        ));
        assert!(matches!(
            validate_username("has space"),
            Err(AppError::Validation { field: "username", .. })
        ));
        assert!(matches!(
            validate_username(&"a".repeat(151)),
            Err(AppError::Validation { field: "username", .. })
        ));
    }
}
