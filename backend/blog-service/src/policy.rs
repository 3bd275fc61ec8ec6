/// Authorization predicates for blog-service
///
/// Ownership-based permission checks: writes to a post or comment are only
/// allowed to their author, and a follow edge is only owned by its follower.
/// Reads never pass through here; public read access is expressed by the
/// handlers simply not requiring an authenticated identity.
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Comment, Follow, Post};

/// Result type for permission checks
pub type PermissionResult = Result<(), AppError>;

/// Check that a user authored a post
pub fn check_post_ownership(user_id: Uuid, post: &Post) -> PermissionResult {
    if post.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You don't have permission to modify this post".to_string(),
        ))
    }
}

/// Check that a user authored a comment
pub fn check_comment_ownership(user_id: Uuid, comment: &Comment) -> PermissionResult {
    if comment.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You don't have permission to modify this comment".to_string(),
        ))
    }
}

/// Check that a user is the follower side of a follow edge
pub fn check_follow_ownership(user_id: Uuid, follow: &Follow) -> PermissionResult {
    if follow.follower_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You don't have permission to delete this follow".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_by(author_id: Uuid) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id,
            group_id: None,
            text: "hello".to_string(),
            image_url: None,
            pub_date: Utc::now(),
        }
    }

    #[test]
    fn test_author_may_modify_own_post() {
        let author = Uuid::new_v4();
        assert!(check_post_ownership(author, &post_by(author)).is_ok());
    }

    #[test]
    fn test_non_author_is_forbidden() {
        let result = check_post_ownership(Uuid::new_v4(), &post_by(Uuid::new_v4()));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_comment_ownership() {
        let author = Uuid::new_v4();
        let comment = Comment {
            id: Uuid::new_v4(),
            author_id: author,
            post_id: Uuid::new_v4(),
            text: "nice".to_string(),
            created: Utc::now(),
        };

        assert!(check_comment_ownership(author, &comment).is_ok());
        assert!(matches!(
            check_comment_ownership(Uuid::new_v4(), &comment),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_follow_owned_by_follower_not_followed() {
        let follower = Uuid::new_v4();
        let followed = Uuid::new_v4();
        let edge = Follow {
            id: Uuid::new_v4(),
            follower_id: follower,
            following_id: followed,
        };

        assert!(check_follow_ownership(follower, &edge).is_ok());
        assert!(matches!(
            check_follow_ownership(followed, &edge),
            Err(AppError::Forbidden(_))
        ));
    }
}
