/// User handlers - HTTP endpoints under /usuarios
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::services::UserService;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[serde(rename = "contraseña")]
    #[validate(length(min = 1))]
    pub password: String,

    #[serde(rename = "universidad")]
    pub university: Option<String>,

    #[serde(rename = "carrera")]
    pub degree: Option<String>,

    #[serde(rename = "intereses", default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,

    #[serde(rename = "contraseña")]
    #[validate(length(min = 1))]
    pub password: String,
}

/// List all registered users, credential hashes stripped
pub async fn list_users(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let users = service.list().await?;
    let total = users.len();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "usuarios": users,
        "total": total,
    })))
}

/// Register a new user
pub async fn register(
    pool: web::Data<PgPool>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = UserService::new((**pool).clone());
    let user = service
        .register(
            &req.name,
            &req.email,
            &req.password,
            req.university.as_deref(),
            req.degree.as_deref(),
            &req.interests,
        )
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "mensaje": "Usuario creado exitosamente",
        "user_id": user.id,
    })))
}

/// Fetch one user
pub async fn get_user(pool: web::Data<PgPool>, user_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let user = service.get(*user_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "usuario": user,
    })))
}

/// Authenticate a user
pub async fn login(pool: web::Data<PgPool>, req: web::Json<LoginRequest>) -> Result<HttpResponse> {
    req.validate()?;

    let service = UserService::new((**pool).clone());
    let user = service.authenticate(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "mensaje": "Login exitoso",
        "usuario": user,
    })))
}

/// Stats-augmented profile
pub async fn get_profile(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let profile = service.get_profile(*user_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "perfil": profile,
    })))
}
