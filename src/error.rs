use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required fields: challengeId and userId")]
    MissingFields,

    #[error("No file uploaded")]
    NoFile,

    #[error("Only image files are allowed!")]
    InvalidFileType,

    #[error("File too large (limit {max_bytes} bytes)")]
    FileTooLarge { max_bytes: usize },

    #[error("User already exists")]
    DuplicateEmail,

    #[error("User not found")]
    UserNotFound,

    #[error("File not found")]
    FileNotFound,

    #[error("Uploaded file missing after write: {0}")]
    UploadFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::MissingFields
            | AppError::NoFile
            | AppError::InvalidFileType
            | AppError::DuplicateEmail => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::FileTooLarge { max_bytes } => (
                StatusCode::BAD_REQUEST,
                format!(
                    "File too large. Maximum size is {}MB.",
                    max_bytes / (1024 * 1024)
                ),
            ),
            AppError::UserNotFound | AppError::FileNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::UploadFailed(ref path) => {
                tracing::error!("File was not saved properly: {}", path);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "File upload failed".to_string(),
                )
            }
            AppError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
