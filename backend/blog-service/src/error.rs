/// Error types for blog-service
///
/// Every failure mode surfaces directly to the caller as a JSON body
/// `{"error", "status"}` with the matching HTTP status; validation failures
/// additionally carry the offending field name. Nothing here is retried.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Result type for blog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Field-level validation failure (HTTP 400).
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }

    /// True when the underlying database error is a unique-constraint
    /// violation. Races on the follows unique index and duplicate usernames
    /// are resolved by the storage layer and mapped through this check.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        matches!(
            err,
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
        )
    }
}

impl From<auth_core::AuthError> for AppError {
    fn from(err: auth_core::AuthError) -> Self {
        use auth_core::AuthError;
        match err {
            AuthError::InvalidToken | AuthError::WrongTokenType { .. } => {
                AppError::Unauthorized("Invalid or expired token".to_string())
            }
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid username or password".to_string())
            }
            AuthError::WeakPassword => {
                AppError::validation("password", "Password does not meet minimum requirements")
            }
            AuthError::NotInitialized | AuthError::AlreadyInitialized | AuthError::Hash(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let body = match self {
            AppError::Validation { field, message } => serde_json::json!({
                "error": message,
                "field": field,
                "status": status.as_u16(),
            }),
            other => serde_json::json!({
                "error": other.to_string(),
                "status": status.as_u16(),
            }),
        };

        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            AppError::validation("text", "empty").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("post".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("no token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("not yours".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Conflict("duplicate".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_body_carries_field() {
        let err = AppError::validation("following", "Following is empty");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = actix_web::body::to_bytes(resp.into_body());
        let body = futures::executor::block_on(body).expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json["field"], "following");
        assert_eq!(json["error"], "Following is empty");
        assert_eq!(json["status"], 400);
    }

    #[derive(Debug)]
    struct StubDbError(&'static str);

    impl std::fmt::Display for StubDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "constraint violation")
        }
    }

    impl std::error::Error for StubDbError {}

    impl sqlx::error::DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some(self.0.into())
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::Other
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn test_unique_violation_detected_by_sqlstate() {
        let err = sqlx::Error::Database(Box::new(StubDbError("23505")));
        assert!(AppError::is_unique_violation(&err));
    }

    #[test]
    fn test_other_sqlstates_are_not_unique_violations() {
        // 23514 is a check-constraint violation
        let err = sqlx::Error::Database(Box::new(StubDbError("23514")));
        assert!(!AppError::is_unique_violation(&err));

        assert!(!AppError::is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn test_auth_error_conversion() {
        let err: AppError = auth_core::AuthError::InvalidToken.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err: AppError = auth_core::AuthError::WeakPassword.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
