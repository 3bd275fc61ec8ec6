/// HTTP request handlers
///
/// One module per resource; DTOs live next to the handlers that use them.
pub mod auth;
pub mod comments;
pub mod follows;
pub mod groups;
pub mod posts;

use serde::Deserialize;

fn default_limit() -> i64 {
    50
}

/// Shared pagination query parameters with defaults
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let params: PaginationParams =
            serde_json::from_str("{}").expect("empty params deserialize");
        assert_eq!(params.limit, 50);
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn test_pagination_explicit() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit": 5, "offset": 10}"#).expect("params deserialize");
        assert_eq!(params.limit, 5);
        assert_eq!(params.offset, 10);
    }
}
