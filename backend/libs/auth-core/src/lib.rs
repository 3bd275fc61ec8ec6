/// Shared authentication primitives for the blog backend
///
/// - `jwt`: HS256 access/refresh token pairs with typed claims. The signing
///   secret is loaded once at startup via `jwt::initialize_secret()` and is
///   immutable afterwards.
/// - `password`: Argon2id password hashing and verification.
pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenPair};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret not initialized; call jwt::initialize_secret() during startup")]
    NotInitialized,

    #[error("JWT secret already initialized")]
    AlreadyInitialized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Wrong token type, expected {expected}")]
    WrongTokenType { expected: &'static str },

    #[error("Password does not meet minimum requirements")]
    WeakPassword,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Hashing failed: {0}")]
    Hash(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
