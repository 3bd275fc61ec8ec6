/// Comment service - always scoped to a single post
///
/// Every operation resolves the post from the request path first; listing
/// and retrieval never touch another post's comments.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::CommentDetail;
use crate::policy;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment under a post. The server sets author and post; any
    /// client-supplied values for those fields never reach this layer.
    pub async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<CommentDetail> {
        self.resolve_post(post_id).await?;

        if text.trim().is_empty() {
            return Err(AppError::validation("text", "Text is empty"));
        }

        let comment = comment_repo::create_comment(&self.pool, post_id, author_id, text).await?;
        Ok(comment)
    }

    /// List the resolved post's comments, newest first
    pub async fn list_comments(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentDetail>> {
        self.resolve_post(post_id).await?;

        Ok(comment_repo::list_post_comments(&self.pool, post_id, limit, offset).await?)
    }

    pub async fn get_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<CommentDetail> {
        self.resolve_post(post_id).await?;

        comment_repo::find_comment_detail(&self.pool, post_id, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    /// Update a comment's text; only the author may write.
    pub async fn update_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        user_id: Uuid,
        text: &str,
    ) -> Result<CommentDetail> {
        self.resolve_post(post_id).await?;

        let comment = comment_repo::find_comment_by_id(&self.pool, post_id, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        policy::check_comment_ownership(user_id, &comment)?;

        if text.trim().is_empty() {
            return Err(AppError::validation("text", "Text is empty"));
        }

        let updated = comment_repo::update_comment(&self.pool, post_id, comment_id, text).await?;
        Ok(updated)
    }

    /// Delete a comment; only the author may write.
    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        self.resolve_post(post_id).await?;

        let comment = comment_repo::find_comment_by_id(&self.pool, post_id, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        policy::check_comment_ownership(user_id, &comment)?;

        comment_repo::delete_comment(&self.pool, post_id, comment_id).await?;
        Ok(())
    }

    async fn resolve_post(&self, post_id: Uuid) -> Result<()> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }
}
