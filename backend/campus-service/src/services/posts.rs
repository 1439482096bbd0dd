/// Post lifecycle and comment append
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::{AuthorSummary, Comment, FeedPost, Post, CATEGORIES, DEFAULT_CATEGORY};

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Publish a new post. The author must resolve to an existing user and
    /// the content must be non-empty; the category must belong to the fixed
    /// vocabulary and defaults to "general".
    pub async fn create_post(
        &self,
        author_id: Uuid,
        content: &str,
        category: Option<&str>,
        title: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Post> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(
                "autor_id y contenido son obligatorios".to_string(),
            ));
        }

        let category = category.unwrap_or(DEFAULT_CATEGORY);
        if !CATEGORIES.contains(&category) {
            return Err(AppError::Validation(format!(
                "Categoría inválida: {}",
                category
            )));
        }

        if db::users::find_by_id(&self.pool, author_id).await?.is_none() {
            return Err(AppError::NotFound("Usuario no encontrado".to_string()));
        }

        let post = db::posts::create_post(
            &self.pool,
            author_id,
            title.unwrap_or_default(),
            content,
            category,
            image_url,
        )
        .await?;

        Ok(post)
    }

    /// Fetch one post by ID
    pub async fn get_post(&self, post_id: Uuid) -> Result<Post> {
        db::posts::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Publicación no encontrada".to_string()))
    }

    /// Fetch one post with its author summary attached. A vanished author
    /// degrades the author fields only.
    pub async fn get_post_with_author(&self, post_id: Uuid) -> Result<FeedPost> {
        let post = self.get_post(post_id).await?;

        let author = db::users::find_by_id(&self.pool, post.user_id)
            .await?
            .map(|user| AuthorSummary::from_user(&user));

        Ok(FeedPost {
            total_likes: post.liked_by.len(),
            viewer_has_liked: false,
            author,
            post,
        })
    }

    /// Append a comment to a post. Comments are append-only; insertion order
    /// is the only ordering.
    pub async fn add_comment(&self, post_id: Uuid, author_id: Uuid, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "user_id y comentario son obligatorios".to_string(),
            ));
        }

        if db::posts::find_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound("Publicación no encontrada".to_string()));
        }

        if db::users::find_by_id(&self.pool, author_id).await?.is_none() {
            return Err(AppError::NotFound("Usuario no encontrado".to_string()));
        }

        let comment = Comment {
            user_id: author_id,
            content: text.to_string(),
            created_at: Utc::now(),
        };

        let updated = db::posts::append_comment(&self.pool, post_id, &comment).await?;
        if updated == 0 {
            return Err(AppError::NotFound("Publicación no encontrada".to_string()));
        }

        Ok(())
    }
}
