use crate::models::{Follow, FollowDetail};
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a follow edge. A concurrent duplicate insert is resolved by the
/// unique index on (follower_id, following_id); the violation is left for
/// the caller to map, since a duplicate must surface as an error rather
/// than be silently ignored.
pub async fn create_follow(
    pool: &PgPool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<FollowDetail, sqlx::Error> {
    let follow = sqlx::query_as::<_, FollowDetail>(
        r#"
        INSERT INTO follows (follower_id, following_id)
        VALUES ($1, $2)
        RETURNING id,
                  (SELECT username FROM users WHERE id = follows.follower_id) AS "user",
                  (SELECT username FROM users WHERE id = follows.following_id) AS following
        "#,
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_one(pool)
    .await?;

    Ok(follow)
}

/// True if the edge (follower, following) already exists
pub async fn follow_exists(
    pool: &PgPool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_as::<_, (bool,)>(
        "SELECT EXISTS (SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// Find a follow edge by ID (internal shape, for ownership checks)
pub async fn find_follow_by_id(
    pool: &PgPool,
    follow_id: Uuid,
) -> Result<Option<Follow>, sqlx::Error> {
    let follow = sqlx::query_as::<_, Follow>(
        r#"
        SELECT id, follower_id, following_id
        FROM follows
        WHERE id = $1
        "#,
    )
    .bind(follow_id)
    .fetch_optional(pool)
    .await?;

    Ok(follow)
}

/// List edges where the given user is the followed party ("who follows me")
pub async fn list_follows_of(
    pool: &PgPool,
    following_id: Uuid,
) -> Result<Vec<FollowDetail>, sqlx::Error> {
    let follows = sqlx::query_as::<_, FollowDetail>(
        r#"
        SELECT f.id, uf.username AS "user", ut.username AS following
        FROM follows f
        JOIN users uf ON uf.id = f.follower_id
        JOIN users ut ON ut.id = f.following_id
        WHERE f.following_id = $1
        ORDER BY uf.username
        "#,
    )
    .bind(following_id)
    .fetch_all(pool)
    .await?;

    Ok(follows)
}

/// Same as `list_follows_of`, further narrowed to a single follower
pub async fn list_follows_of_by_follower(
    pool: &PgPool,
    following_id: Uuid,
    follower_id: Uuid,
) -> Result<Vec<FollowDetail>, sqlx::Error> {
    let follows = sqlx::query_as::<_, FollowDetail>(
        r#"
        SELECT f.id, uf.username AS "user", ut.username AS following
        FROM follows f
        JOIN users uf ON uf.id = f.follower_id
        JOIN users ut ON ut.id = f.following_id
        WHERE f.following_id = $1 AND f.follower_id = $2
        ORDER BY uf.username
        "#,
    )
    .bind(following_id)
    .bind(follower_id)
    .fetch_all(pool)
    .await?;

    Ok(follows)
}

/// Delete a follow edge. Returns true if a row was removed.
pub async fn delete_follow(pool: &PgPool, follow_id: Uuid) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM follows WHERE id = $1")
        .bind(follow_id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}
