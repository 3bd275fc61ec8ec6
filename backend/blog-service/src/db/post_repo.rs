use crate::models::{Post, PostDetail};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new post. `pub_date` is assigned by the database.
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    group_id: Option<Uuid>,
    image_url: Option<&str>,
) -> Result<PostDetail, sqlx::Error> {
    let post = sqlx::query_as::<_, PostDetail>(
        r#"
        INSERT INTO posts (author_id, text, group_id, image_url)
        VALUES ($1, $2, $3, $4)
        RETURNING id, text,
                  (SELECT username FROM users WHERE id = posts.author_id) AS author,
                  pub_date
        "#,
    )
    .bind(author_id)
    .bind(text)
    .bind(group_id)
    .bind(image_url)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post row by ID (internal shape, used for ownership checks)
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_url, pub_date
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID in its response representation
pub async fn find_post_detail(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Option<PostDetail>, sqlx::Error> {
    let post = sqlx::query_as::<_, PostDetail>(
        r#"
        SELECT p.id, p.text, u.username AS author, p.pub_date
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List posts, newest first
pub async fn list_posts(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostDetail>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostDetail>(
        r#"
        SELECT p.id, p.text, u.username AS author, p.pub_date
        FROM posts p
        JOIN users u ON u.id = p.author_id
        ORDER BY p.pub_date DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// List posts belonging to a group, newest first
pub async fn list_posts_by_group(
    pool: &PgPool,
    group_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostDetail>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostDetail>(
        r#"
        SELECT p.id, p.text, u.username AS author, p.pub_date
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.group_id = $1
        ORDER BY p.pub_date DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(group_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Update a post's mutable fields. Absent fields keep their stored value.
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    text: Option<&str>,
    group_id: Option<Uuid>,
    image_url: Option<&str>,
) -> Result<PostDetail, sqlx::Error> {
    let post = sqlx::query_as::<_, PostDetail>(
        r#"
        UPDATE posts
        SET text = COALESCE($2, text),
            group_id = COALESCE($3, group_id),
            image_url = COALESCE($4, image_url)
        WHERE id = $1
        RETURNING id, text,
                  (SELECT username FROM users WHERE id = posts.author_id) AS author,
                  pub_date
        "#,
    )
    .bind(post_id)
    .bind(text)
    .bind(group_id)
    .bind(image_url)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Delete a post; comments cascade at the storage layer.
/// Returns true if a row was removed.
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}
