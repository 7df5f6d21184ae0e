use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum SnipboxError {
    #[error("Username already exists! Try a crazier one!")]
    UsernameTaken(String),

    #[error("Incorrect details. Please put the correct username and password.")]
    InvalidCredentials,

    #[error("Permission Denied")]
    PermissionDenied,

    #[error("Snippet not found")]
    SnippetNotFound(i64),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Figment error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl SnipboxError {
    /// Errors the user can fix by resubmitting a form.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            SnipboxError::UsernameTaken(_)
                | SnipboxError::InvalidCredentials
                | SnipboxError::InvalidInput(_)
        )
    }
}

impl From<figment::Error> for SnipboxError {
    fn from(e: figment::Error) -> Self {
        SnipboxError::Figment(Box::new(e))
    }
}

impl IntoResponse for SnipboxError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            SnipboxError::UsernameTaken(_) => {
                (StatusCode::CONFLICT, "USERNAME_TAKEN", self.to_string())
            }
            SnipboxError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_FAILED",
                self.to_string(),
            ),
            SnipboxError::PermissionDenied => {
                (StatusCode::FORBIDDEN, "PERMISSION_DENIED", self.to_string())
            }
            SnipboxError::SnippetNotFound(_) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            }
            SnipboxError::InvalidInput(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", self.to_string())
            }
            SnipboxError::PasswordHash(_)
            | SnipboxError::DatabaseError(_)
            | SnipboxError::Config(_)
            | SnipboxError::Figment(_)
            | SnipboxError::Io(_)
            | SnipboxError::TaskJoin(_) => {
                error!(error = %self, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred.".to_string(),
                )
            }
        };
        let body = ApiErrorBody {
            success: false,
            code: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub code: String,
    pub message: String,
}
