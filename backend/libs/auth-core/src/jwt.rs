/// JWT issuance and validation
///
/// Tokens are signed with HS256 using a secret provided by configuration.
/// Two token types exist: short-lived "access" tokens carried as bearer
/// credentials, and long-lived "refresh" tokens exchanged for new pairs at
/// the refresh endpoint. The secret is stored in a `OnceCell` so it is set
/// exactly once at startup and never rotated at runtime.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AuthError, Result};

const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 1;
const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims: standard fields plus the handle of the authenticated user,
/// so handlers can render author handles without an extra lookup.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
    /// Username (handle)
    pub username: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::InvalidToken)
    }
}

/// Access/refresh token pair returned by the token endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

static JWT_ENCODING_KEY: OnceCell<EncodingKey> = OnceCell::new();
static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

/// Install the signing secret. Must be called during startup before any
/// token operation; returns `AlreadyInitialized` on a second call.
pub fn initialize_secret(secret: &str) -> Result<()> {
    JWT_ENCODING_KEY
        .set(EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|_| AuthError::AlreadyInitialized)?;

    JWT_DECODING_KEY
        .set(DecodingKey::from_secret(secret.as_bytes()))
        .map_err(|_| AuthError::AlreadyInitialized)?;

    Ok(())
}

fn get_encoding_key() -> Result<&'static EncodingKey> {
    JWT_ENCODING_KEY.get().ok_or(AuthError::NotInitialized)
}

fn get_decoding_key() -> Result<&'static DecodingKey> {
    JWT_DECODING_KEY.get().ok_or(AuthError::NotInitialized)
}

fn generate_token(user_id: Uuid, username: &str, token_type: &str, lifetime: Duration) -> Result<String> {
    let now = Utc::now();

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + lifetime).timestamp(),
        token_type: token_type.to_string(),
        username: username.to_string(),
    };

    encode(&Header::new(JWT_ALGORITHM), &claims, get_encoding_key()?)
        .map_err(|_| AuthError::InvalidToken)
}

/// Generate a short-lived access token.
pub fn generate_access_token(user_id: Uuid, username: &str) -> Result<String> {
    generate_token(
        user_id,
        username,
        "access",
        Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS),
    )
}

/// Generate a long-lived refresh token.
pub fn generate_refresh_token(user_id: Uuid, username: &str) -> Result<String> {
    generate_token(
        user_id,
        username,
        "refresh",
        Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
    )
}

/// Generate both tokens in one call.
pub fn generate_token_pair(user_id: Uuid, username: &str) -> Result<TokenPair> {
    Ok(TokenPair {
        access_token: generate_access_token(user_id, username)?,
        refresh_token: generate_refresh_token(user_id, username)?,
        token_type: "Bearer".to_string(),
        expires_in: ACCESS_TOKEN_EXPIRY_HOURS * 3600,
    })
}

fn validate_token(token: &str) -> Result<Claims> {
    let validation = Validation::new(JWT_ALGORITHM);

    decode::<Claims>(token, get_decoding_key()?, &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
}

/// Validate a bearer credential. Refresh tokens are rejected here so they
/// cannot be replayed as access tokens.
pub fn validate_access_token(token: &str) -> Result<Claims> {
    let claims = validate_token(token)?;
    if claims.token_type != "access" {
        return Err(AuthError::WrongTokenType { expected: "access" });
    }
    Ok(claims)
}

/// Validate a token presented at the refresh endpoint.
pub fn validate_refresh_token(token: &str) -> Result<Claims> {
    let claims = validate_token(token)?;
    if claims.token_type != "refresh" {
        return Err(AuthError::WrongTokenType { expected: "refresh" });
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = initialize_secret("test-secret-not-for-production");
    }

    #[test]
    fn test_access_token_round_trip() {
        init();
        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, "alice").expect("token generation");

        let claims = validate_access_token(&token).expect("token validation");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        init();
        let token = generate_refresh_token(Uuid::new_v4(), "alice").expect("token generation");

        let result = validate_access_token(&token);
        assert!(matches!(
            result,
            Err(AuthError::WrongTokenType { expected: "access" })
        ));
    }

    #[test]
    fn test_access_token_rejected_at_refresh() {
        init();
        let token = generate_access_token(Uuid::new_v4(), "alice").expect("token generation");

        let result = validate_refresh_token(&token);
        assert!(matches!(
            result,
            Err(AuthError::WrongTokenType { expected: "refresh" })
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        init();
        assert!(matches!(
            validate_access_token("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_pair_contains_both_types() {
        init();
        let pair = generate_token_pair(Uuid::new_v4(), "bob").expect("pair generation");

        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 3600);
        assert!(validate_access_token(&pair.access_token).is_ok());
        assert!(validate_refresh_token(&pair.refresh_token).is_ok());
    }
}
