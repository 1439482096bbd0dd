/// Data models for campus-service
///
/// Row types map 1:1 onto the `users` and `posts` tables; the wire field
/// names keep the Spanish contract the frontend already speaks, so each
/// serialized field carries a `rename`. Identifiers cross the boundary as
/// opaque strings (UUID text form).
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// Fixed category vocabulary. The first four form the "broad interest" core
/// set used by the personalized feed policy.
pub const CATEGORIES: [&str; 5] = ["general", "academico", "eventos", "ayuda", "social"];

pub const DEFAULT_CATEGORY: &str = "general";

/// A viewer whose interests span at least this many categories sees the whole
/// catalog instead of a narrow slice.
pub const BROAD_INTEREST_THRESHOLD: usize = 4;

/// A registered user. The credential hash never serializes.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "universidad")]
    pub university: Option<String>,
    #[serde(rename = "carrera")]
    pub degree: Option<String>,
    #[serde(rename = "intereses")]
    pub interests: Vec<String>,
    #[serde(rename = "fecha_registro")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "seguidores")]
    pub followers: Vec<Uuid>,
    #[serde(rename = "siguiendo")]
    pub following: Vec<Uuid>,
}

/// A post. The liker set and comment sequence live on the row so the like
/// counter and the set are mutated by the same statement.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "contenido")]
    pub content: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "imagen_url")]
    pub image_url: Option<String>,
    #[serde(rename = "fecha")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "activa")]
    pub active: bool,
    pub likes: i32,
    #[serde(rename = "usuarios_likes")]
    pub liked_by: Vec<Uuid>,
    #[serde(rename = "comentarios")]
    pub comments: Json<Vec<Comment>>,
}

/// A comment on a post. Append-only; insertion order is the only ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub user_id: Uuid,
    #[serde(rename = "comentario")]
    pub content: String,
    #[serde(rename = "fecha")]
    pub created_at: DateTime<Utc>,
}

/// Denormalized author summary attached to feed entries.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "universidad")]
    pub university: String,
    #[serde(rename = "carrera")]
    pub degree: String,
}

impl AuthorSummary {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            university: user.university.clone().unwrap_or_default(),
            degree: user.degree.clone().unwrap_or_default(),
        }
    }
}

/// A post annotated for display: ground-truth like total, the viewer's like
/// state, and the author summary when the author still resolves.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: Post,
    pub total_likes: usize,
    #[serde(rename = "usuario_dio_like")]
    pub viewer_has_liked: bool,
    #[serde(rename = "autor", skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorSummary>,
}

/// Aggregated statistics for a user's profile.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStats {
    #[serde(rename = "total_publicaciones")]
    pub total_posts: usize,
    #[serde(rename = "total_likes_recibidos")]
    pub total_likes_received: i64,
    #[serde(rename = "categoria_favorita")]
    pub favorite_category: String,
    #[serde(rename = "categorias_uso")]
    pub category_usage: BTreeMap<String, usize>,
    #[serde(rename = "fecha_registro")]
    pub member_since: DateTime<Utc>,
}

/// Stats-augmented profile response.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    #[serde(rename = "usuario")]
    pub user: User,
    #[serde(rename = "estadisticas")]
    pub stats: ProfileStats,
    #[serde(rename = "publicaciones_recientes")]
    pub recent_posts: Vec<Post>,
}

/// Outcome of a like toggle: the resulting state and the refreshed counter.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeOutcome {
    pub likes: i32,
    #[serde(rename = "usuario_dio_like")]
    pub liked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@ucc.edu.co".into(),
            password_hash: "$argon2id$secret".into(),
            university: Some("UCC".into()),
            degree: None,
            interests: vec!["eventos".into()],
            created_at: Utc::now(),
            active: true,
            followers: vec![],
            following: vec![],
        }
    }

    #[test]
    fn test_user_serialization_strips_credential_hash() {
        let value = serde_json::to_value(sample_user()).expect("serialize");
        assert!(value.get("password_hash").is_none());
        assert!(value.get("contraseña").is_none());
        assert_eq!(value["nombre"], "Ana");
        assert_eq!(value["universidad"], "UCC");
    }

    #[test]
    fn test_post_wire_field_names() {
        let post = Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: String::new(),
            content: "hola".into(),
            category: "general".into(),
            image_url: None,
            created_at: Utc::now(),
            active: true,
            likes: 2,
            liked_by: vec![Uuid::new_v4(), Uuid::new_v4()],
            comments: Json(vec![]),
        };
        let value = serde_json::to_value(&post).expect("serialize");
        assert_eq!(value["contenido"], "hola");
        assert_eq!(value["categoria"], "general");
        assert_eq!(value["usuarios_likes"].as_array().map(|a| a.len()), Some(2));
        assert!(value["id"].is_string());
    }
}
