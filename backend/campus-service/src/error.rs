/// Error types for campus-service
///
/// Every failure is converted at the request boundary into the uniform
/// `{"success": false, "error": <message>}` envelope with a non-2xx status.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Result type for campus-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed required fields
    #[error("{0}")]
    Validation(String),

    /// Referenced user/post absent
    #[error("{0}")]
    NotFound(String),

    #[error("El email ya está registrado")]
    DuplicateEmail,

    #[error("Credenciales inválidas")]
    InvalidCredentials,

    /// Store failure or malformed identifier
    #[error("Error de consulta: {0}")]
    Query(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", err);
        AppError::Query(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::DuplicateEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Query("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_credential_errors_share_message() {
        // Unknown email and wrong password must be indistinguishable.
        assert_eq!(
            AppError::InvalidCredentials.to_string(),
            "Credenciales inválidas"
        );
    }
}
