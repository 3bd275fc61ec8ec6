/// Follow service - directed follow edges between users
///
/// Creation validates in a fixed order: empty handle, self-follow, handle
/// resolution, duplicate edge. The duplicate check runs before the insert
/// for a clean error, but the insert itself relies on the storage unique
/// index to settle concurrent requests; both paths produce the same error.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::FollowDetail;
use crate::policy;

const ALREADY_FOLLOWS: &str = "User already follows this author";

pub struct FollowService {
    pool: PgPool,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an edge (requester -> target handle).
    pub async fn create_follow(
        &self,
        requester_id: Uuid,
        requester_username: &str,
        following: &str,
    ) -> Result<FollowDetail> {
        validate_follow_target(requester_username, following)?;

        let target = user_repo::find_user_by_username(&self.pool, following)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if follow_repo::follow_exists(&self.pool, requester_id, target.id).await? {
            return Err(AppError::validation("following", ALREADY_FOLLOWS));
        }

        match follow_repo::create_follow(&self.pool, requester_id, target.id).await {
            Ok(follow) => Ok(follow),
            // Lost the race against a concurrent identical insert
            Err(err) if AppError::is_unique_violation(&err) => {
                Err(AppError::validation("following", ALREADY_FOLLOWS))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// List edges where the requester is the followed party, optionally
    /// narrowed to one follower by exact handle match.
    pub async fn list_follows(
        &self,
        requester_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<FollowDetail>> {
        match search {
            Some(handle) => {
                let follower = user_repo::find_user_by_username(&self.pool, handle)
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

                Ok(
                    follow_repo::list_follows_of_by_follower(&self.pool, requester_id, follower.id)
                        .await?,
                )
            }
            None => Ok(follow_repo::list_follows_of(&self.pool, requester_id).await?),
        }
    }

    /// Delete an edge; only its follower may.
    pub async fn delete_follow(&self, follow_id: Uuid, requester_id: Uuid) -> Result<()> {
        let follow = follow_repo::find_follow_by_id(&self.pool, follow_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Follow not found".to_string()))?;

        policy::check_follow_ownership(requester_id, &follow)?;

        follow_repo::delete_follow(&self.pool, follow_id).await?;
        Ok(())
    }
}

/// Pre-resolution checks on the target handle. The empty check runs before
/// any existence lookup, and a user can never follow their own handle.
fn validate_follow_target(requester_username: &str, following: &str) -> Result<()> {
    if following.is_empty() {
        return Err(AppError::validation("following", "Following is empty"));
    }
    if following == requester_username {
        return Err(AppError::validation("following", "Can not follow yourself"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_handle_rejected_first() {
        // Empty must win even when the requester's own handle is empty too
        let result = validate_follow_target("", "");
        match result {
            Err(AppError::Validation { field, message }) => {
                assert_eq!(field, "following");
                assert_eq!(message, "Following is empty");
            }
            other => panic!("expected empty-handle validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_self_follow_rejected() {
        let result = validate_follow_target("alice", "alice");
        match result {
            Err(AppError::Validation { field, message }) => {
                assert_eq!(field, "following");
                assert_eq!(message, "Can not follow yourself");
            }
            other => panic!("expected self-follow validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_handle_match_is_case_sensitive() {
        // "Alice" is a different handle than "alice"; resolution decides
        assert!(validate_follow_target("alice", "Alice").is_ok());
    }

    #[test]
    fn test_other_handle_accepted() {
        assert!(validate_follow_target("bob", "alice").is_ok());
    }
}
