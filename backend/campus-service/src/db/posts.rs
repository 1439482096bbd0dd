use crate::models::{Comment, Post};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new post with an empty liker set and comment sequence
pub async fn create_post(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    content: &str,
    category: &str,
    image_url: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, title, content, category, image_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(title)
    .bind(content)
    .bind(category)
    .bind(image_url)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// All active posts, most recent first
pub async fn find_all_active(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT * FROM posts WHERE active ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Active posts in one category, most recent first
pub async fn find_active_by_category(
    pool: &PgPool,
    category: &str,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT * FROM posts WHERE category = $1 AND active ORDER BY created_at DESC",
    )
    .bind(category)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Active posts by one author, most recent first
pub async fn find_active_by_author(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT * FROM posts WHERE user_id = $1 AND active ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Active posts matching any of the given categories, most recent first
/// (set-membership filter for the interest-based feed)
pub async fn find_active_by_categories(
    pool: &PgPool,
    categories: &[String],
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT * FROM posts WHERE category = ANY($1) AND active ORDER BY created_at DESC",
    )
    .bind(categories)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Add a user's like: one compound statement increments the counter and
/// inserts into the liker set, guarded by the membership test. A concurrent
/// duplicate matches zero rows, so the counter can never run ahead of the set.
pub async fn add_like(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET likes = likes + 1, liked_by = array_append(liked_by, $2)
        WHERE id = $1 AND NOT ($2 = ANY(liked_by))
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Remove a user's like; the mirror image of [`add_like`].
pub async fn remove_like(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET likes = likes - 1, liked_by = array_remove(liked_by, $2)
        WHERE id = $1 AND $2 = ANY(liked_by)
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Check whether a user is in a post's liker set
pub async fn has_liked(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let liked = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1 AND $2 = ANY(liked_by))",
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(liked)
}

/// Append a comment to a post's comment sequence (append order is the only
/// ordering)
pub async fn append_comment(
    pool: &PgPool,
    post_id: Uuid,
    comment: &Comment,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET comments = comments || $2
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .bind(Json(comment))
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
