/// Post service - creation, listing, retrieval, update, deletion
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{group_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::PostDetail;
use crate::policy;

pub struct PostService {
    pool: PgPool,
}

/// Partial update payload; absent fields keep their stored value. Fields
/// can only be replaced, never cleared back to NULL: JSON `null` and an
/// absent field both deserialize to `None` and the update coalesces `None`
/// to the stored value.
#[derive(Debug, Default)]
pub struct PostChanges<'a> {
    pub text: Option<&'a str>,
    pub group: Option<Uuid>,
    pub image_url: Option<&'a str>,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post authored by the requester. A supplied group must exist.
    pub async fn create_post(
        &self,
        author_id: Uuid,
        text: &str,
        group: Option<Uuid>,
        image_url: Option<&str>,
    ) -> Result<PostDetail> {
        validate_text(text)?;

        if let Some(group_id) = group {
            self.resolve_group(group_id).await?;
        }

        let post = post_repo::create_post(&self.pool, author_id, text, group, image_url).await?;
        Ok(post)
    }

    /// List posts newest first, optionally narrowed to a group.
    /// An unknown group id is a not-found failure, not an empty list.
    pub async fn list_posts(
        &self,
        group: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostDetail>> {
        match group {
            Some(group_id) => {
                self.resolve_group(group_id).await?;
                Ok(post_repo::list_posts_by_group(&self.pool, group_id, limit, offset).await?)
            }
            None => Ok(post_repo::list_posts(&self.pool, limit, offset).await?),
        }
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<PostDetail> {
        post_repo::find_post_detail(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    /// Update a post; only the author may write.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        changes: PostChanges<'_>,
    ) -> Result<PostDetail> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        policy::check_post_ownership(user_id, &post)?;

        if let Some(text) = changes.text {
            validate_text(text)?;
        }
        if let Some(group_id) = changes.group {
            self.resolve_group(group_id).await?;
        }

        let updated = post_repo::update_post(
            &self.pool,
            post_id,
            changes.text,
            changes.group,
            changes.image_url,
        )
        .await?;

        Ok(updated)
    }

    /// Delete a post; only the author may write. Comments cascade.
    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<()> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        policy::check_post_ownership(user_id, &post)?;

        post_repo::delete_post(&self.pool, post_id).await?;
        Ok(())
    }

    async fn resolve_group(&self, group_id: Uuid) -> Result<()> {
        group_repo::find_group_by_id(&self.pool, group_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))
    }
}

fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(AppError::validation("text", "Text is empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_rejected() {
        assert!(matches!(
            validate_text(""),
            Err(AppError::Validation { field: "text", .. })
        ));
        assert!(matches!(
            validate_text("   "),
            Err(AppError::Validation { field: "text", .. })
        ));
    }

    #[test]
    fn test_non_empty_text_accepted() {
        assert!(validate_text("hello").is_ok());
    }
}
