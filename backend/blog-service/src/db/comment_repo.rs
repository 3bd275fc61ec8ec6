use crate::models::{Comment, CommentDetail};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new comment under a post. `created` is assigned by the database.
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    text: &str,
) -> Result<CommentDetail, sqlx::Error> {
    let comment = sqlx::query_as::<_, CommentDetail>(
        r#"
        INSERT INTO comments (post_id, author_id, text)
        VALUES ($1, $2, $3)
        RETURNING id,
                  (SELECT username FROM users WHERE id = comments.author_id) AS author,
                  post_id AS post, text, created
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Find a comment row scoped to its post (internal shape).
/// A comment id under the wrong post resolves to nothing.
pub async fn find_comment_by_id(
    pool: &PgPool,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, author_id, post_id, text, created
        FROM comments
        WHERE id = $1 AND post_id = $2
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Find a comment in its response representation, scoped to its post
pub async fn find_comment_detail(
    pool: &PgPool,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<CommentDetail>, sqlx::Error> {
    let comment = sqlx::query_as::<_, CommentDetail>(
        r#"
        SELECT c.id, u.username AS author, c.post_id AS post, c.text, c.created
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.id = $1 AND c.post_id = $2
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// List comments for a post, newest first
pub async fn list_post_comments(
    pool: &PgPool,
    post_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<CommentDetail>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentDetail>(
        r#"
        SELECT c.id, u.username AS author, c.post_id AS post, c.text, c.created
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(post_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Update a comment's text
pub async fn update_comment(
    pool: &PgPool,
    post_id: Uuid,
    comment_id: Uuid,
    text: &str,
) -> Result<CommentDetail, sqlx::Error> {
    let comment = sqlx::query_as::<_, CommentDetail>(
        r#"
        UPDATE comments
        SET text = $3
        WHERE id = $1 AND post_id = $2
        RETURNING id,
                  (SELECT username FROM users WHERE id = comments.author_id) AS author,
                  post_id AS post, text, created
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .bind(text)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Delete a comment. Returns true if a row was removed.
pub async fn delete_comment(
    pool: &PgPool,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM comments WHERE id = $1 AND post_id = $2")
        .bind(comment_id)
        .bind(post_id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}
