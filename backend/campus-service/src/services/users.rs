/// User directory: registration, authentication, profiles
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::{Post, Profile, ProfileStats, User, DEFAULT_CATEGORY};
use crate::security::password;

/// How many of a user's posts the profile response embeds.
const RECENT_POSTS_LIMIT: usize = 10;

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new user. The credential is hashed before storage and the
    /// clear text is never retained.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        university: Option<&str>,
        degree: Option<&str>,
        interests: &[String],
    ) -> Result<User> {
        if db::users::email_exists(&self.pool, email).await? {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = password::hash_password(password)?;

        // The unique index catches a concurrent registration that slipped
        // past the pre-check.
        match db::users::create_user(
            &self.pool,
            name,
            email,
            &password_hash,
            university,
            degree,
            interests,
        )
        .await
        {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Authenticate by email and credential. Unknown email and credential
    /// mismatch are indistinguishable to the caller.
    pub async fn authenticate(&self, email: &str, raw_password: &str) -> Result<User> {
        let user = db::users::find_by_email(&self.pool, email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !password::verify_password(raw_password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Fetch one user by ID
    pub async fn get(&self, user_id: Uuid) -> Result<User> {
        db::users::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }

    /// List all registered users
    pub async fn list(&self) -> Result<Vec<User>> {
        Ok(db::users::list_users(&self.pool).await?)
    }

    /// Compose the user record with statistics over their authored posts and
    /// their most recent publications.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Profile> {
        let user = self.get(user_id).await?;
        let posts = db::posts::find_active_by_author(&self.pool, user_id).await?;

        let stats = profile_stats(&posts, user.created_at);
        let recent_posts = posts.into_iter().take(RECENT_POSTS_LIMIT).collect();

        Ok(Profile {
            user,
            stats,
            recent_posts,
        })
    }
}

/// Aggregate a user's posts into profile statistics. The favorite category is
/// the mode of the categories used; ties go to the lexicographically smallest
/// category, "general" when there are no posts.
pub fn profile_stats(posts: &[Post], member_since: DateTime<Utc>) -> ProfileStats {
    let mut category_usage: BTreeMap<String, usize> = BTreeMap::new();
    for post in posts {
        *category_usage.entry(post.category.clone()).or_default() += 1;
    }

    let mut favorite_category = DEFAULT_CATEGORY.to_string();
    let mut best = 0;
    for (category, &count) in &category_usage {
        // Strict comparison over the sorted map keeps the first (smallest)
        // category on ties.
        if count > best {
            best = count;
            favorite_category = category.clone();
        }
    }

    ProfileStats {
        total_posts: posts.len(),
        total_likes_received: posts.iter().map(|post| i64::from(post.likes)).sum(),
        favorite_category,
        category_usage,
        member_since,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    fn post(category: &str, likes: i32) -> Post {
        Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: String::new(),
            content: "contenido".to_string(),
            category: category.to_string(),
            image_url: None,
            created_at: Utc::now(),
            active: true,
            likes,
            liked_by: vec![],
            comments: Json(vec![]),
        }
    }

    #[test]
    fn test_stats_totals() {
        let posts = vec![post("general", 2), post("eventos", 3), post("eventos", 0)];
        let stats = profile_stats(&posts, Utc::now());

        assert_eq!(stats.total_posts, 3);
        assert_eq!(stats.total_likes_received, 5);
        assert_eq!(stats.category_usage.get("eventos"), Some(&2));
    }

    #[test]
    fn test_favorite_category_is_the_mode() {
        let posts = vec![post("ayuda", 0), post("eventos", 0), post("ayuda", 1)];
        let stats = profile_stats(&posts, Utc::now());
        assert_eq!(stats.favorite_category, "ayuda");
    }

    #[test]
    fn test_favorite_category_tie_breaks_lexicographically() {
        let posts = vec![
            post("social", 0),
            post("academico", 0),
            post("social", 0),
            post("academico", 0),
        ];
        let stats = profile_stats(&posts, Utc::now());
        assert_eq!(stats.favorite_category, "academico");
    }

    #[test]
    fn test_no_posts_defaults_to_general() {
        let stats = profile_stats(&[], Utc::now());
        assert_eq!(stats.favorite_category, "general");
        assert_eq!(stats.total_posts, 0);
        assert_eq!(stats.total_likes_received, 0);
        assert!(stats.category_usage.is_empty());
    }
}
