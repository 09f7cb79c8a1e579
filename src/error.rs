use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use utoipa::ToSchema;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum VaultError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    FileUpload(String),

    #[error("User [ {0} ] already exists")]
    UserAlreadyExists(String),

    #[error("Missing or invalid bearer token")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("Card already stored")]
    DuplicateCard,

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VaultError {
    pub fn status(&self) -> StatusCode {
        match self {
            VaultError::Validation(_)
            | VaultError::FileUpload(_)
            | VaultError::UserAlreadyExists(_) => StatusCode::BAD_REQUEST,
            VaultError::Unauthorized | VaultError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            VaultError::NotFound(_) => StatusCode::NOT_FOUND,
            VaultError::DuplicateCard => StatusCode::CONFLICT,
            VaultError::Crypto(_)
            | VaultError::DatabaseError(_)
            | VaultError::Migration(_)
            | VaultError::PasswordHash(_)
            | VaultError::Jwt(_)
            | VaultError::Task(_)
            | VaultError::RactorError(_)
            | VaultError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            VaultError::Validation(_) => "VALIDATION_ERROR",
            VaultError::FileUpload(_) => "FILE_UPLOAD_ERROR",
            VaultError::UserAlreadyExists(_) => "USER_ALREADY_EXISTS",
            VaultError::Unauthorized | VaultError::InvalidCredentials => "UNAUTHORIZED",
            VaultError::NotFound(_) => "NOT_FOUND",
            VaultError::DuplicateCard => "DUPLICATE_CARD",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for VaultError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed with internal error");
            "An internal server error occurred.".to_string()
        } else {
            self.to_string()
        };
        let body = ApiErrorBody {
            code: self.code().to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize, ToSchema)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let resp = VaultError::NotFound("Card not found".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains(r#""code":"NOT_FOUND""#));
        assert!(body.contains(r#""message":"Card not found""#));
    }

    #[tokio::test]
    async fn internal_errors_hide_detail() {
        let resp = VaultError::Crypto("Decryption failed: bad tag".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("INTERNAL_ERROR"));
        assert!(!body.contains("bad tag"));
    }
}
