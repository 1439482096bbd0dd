/// Like toggle protocol
///
/// Per (post, user) pair there are two states, liked and not-liked. A toggle
/// reads the current membership to pick a direction, then issues exactly one
/// compound update that moves the counter and the liker set together. The
/// membership guard inside that update, not the preceding read, is what keeps
/// a racing duplicate toggle from double-counting: the losing statement
/// matches zero rows.
use crate::db;
use crate::error::{AppError, Result};
use crate::models::LikeOutcome;
use sqlx::PgPool;
use uuid::Uuid;

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle a user's like on a post. Returns the resulting state and the
    /// counter re-read after the mutation.
    pub async fn toggle(&self, post_id: Uuid, user_id: Uuid) -> Result<LikeOutcome> {
        let post = db::posts::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Publicación no encontrada".to_string()))?;

        if post.liked_by.contains(&user_id) {
            db::posts::remove_like(&self.pool, post_id, user_id).await?;
        } else {
            db::posts::add_like(&self.pool, post_id, user_id).await?;
        }

        // Re-read: the response reflects whatever state the store settled on,
        // even if a concurrent toggle won the conditional update.
        let refreshed = db::posts::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Publicación no encontrada".to_string()))?;

        Ok(LikeOutcome {
            likes: refreshed.likes,
            liked: refreshed.liked_by.contains(&user_id),
        })
    }
}
