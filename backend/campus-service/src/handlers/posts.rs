/// Post handlers - HTTP endpoints under /publicaciones
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::services::{FeedQuery, FeedService, LikeService, PostService};

/// Query parameters of the feed listing. Identifiers arrive as opaque
/// strings; a malformed one surfaces as a query error, not a validation
/// failure.
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub categoria: Option<String>,
    pub user_id: Option<String>,
    pub personalizadas: Option<String>,
    pub current_user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(rename = "autor_id")]
    pub author_id: Option<Uuid>,
    // The frontend has sent both field names over time.
    pub user_id: Option<Uuid>,
    #[serde(rename = "contenido")]
    pub content: String,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "imagen_url")]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub user_id: Option<Uuid>,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
}

fn parse_id(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|_| AppError::Query(format!("Identificador inválido: {}", value)))
}

/// List posts: by category, by author, personalized for a viewer, or the
/// whole catalog; ranked by popularity and annotated for display.
pub async fn list_posts(
    pool: web::Data<PgPool>,
    params: web::Query<FeedParams>,
) -> Result<HttpResponse> {
    let viewer = params
        .current_user_id
        .as_deref()
        .map(parse_id)
        .transpose()?;

    let query = FeedQuery {
        category: params.categoria.clone(),
        author: params.user_id.as_deref().map(parse_id).transpose()?,
        personalized: params.personalizadas.as_deref() == Some("true"),
        viewer,
    };

    let service = FeedService::new((**pool).clone());
    let posts = service.list(&query).await?;
    let total = posts.len();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "publicaciones": posts,
        "total": total,
    })))
}

/// Create a new post
pub async fn create_post(
    pool: web::Data<PgPool>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let author_id = req.author_id.or(req.user_id).ok_or_else(|| {
        AppError::Validation("autor_id y contenido son obligatorios".to_string())
    })?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(
            author_id,
            &req.content,
            req.category.as_deref(),
            req.title.as_deref(),
            req.image_url.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "mensaje": "Publicación creada exitosamente",
        "publicacion_id": post.id,
    })))
}

/// Fetch one post, author-annotated
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.get_post_with_author(*post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "publicacion": post,
    })))
}

/// Toggle the requesting user's like on a post
pub async fn toggle_like(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    let user_id = req
        .user_id
        .ok_or_else(|| AppError::Validation("user_id es requerido".to_string()))?;

    let service = LikeService::new((**pool).clone());
    let outcome = service.toggle(*post_id, user_id).await?;

    let mensaje = if outcome.liked {
        "Like agregado"
    } else {
        "Like removido"
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "mensaje": mensaje,
        "data": {
            "likes": outcome.likes,
            "usuario_dio_like": outcome.liked,
            "publicacion_id": *post_id,
        },
        // older clients read the flat fields
        "likes": outcome.likes,
        "usuario_dio_like": outcome.liked,
    })))
}

/// Append a comment to a post
pub async fn add_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let (user_id, comment) = match (req.user_id, req.comment.as_deref()) {
        (Some(user_id), Some(comment)) => (user_id, comment),
        _ => {
            return Err(AppError::Validation(
                "user_id y comentario son obligatorios".to_string(),
            ))
        }
    };

    let service = PostService::new((**pool).clone());
    service.add_comment(*post_id, user_id, comment).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "mensaje": "Comentario agregado exitosamente",
    })))
}
