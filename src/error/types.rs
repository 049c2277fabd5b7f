use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

pub type AppResult<T> = Result<T, AppError>;

/// Fields a save request must carry.
pub const REQUIRED_INTERVIEW_FIELDS: [&str; 2] = ["interviewField", "qaPairs"];

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    UploadRejected { message: String },

    #[error("File too large: uploads are limited to {limit_mb}MB")]
    FileTooLarge { limit_mb: usize },

    #[error("PDF processing failed: {message}")]
    ExtractionError { message: String },

    #[error("Missing required fields: {message}")]
    ValidationError { message: String },

    #[error("{message}")]
    PersistenceError { message: String },

    #[error("{message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Cannot {method} {path}")]
    RouteNotFound { method: String, path: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::UploadRejected { .. } => "UPLOAD_REJECTED",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::ExtractionError { .. } => "EXTRACTION_ERROR",
            AppError::ValidationError { .. } => "VALIDATION_ERROR",
            AppError::PersistenceError { .. } => "PERSISTENCE_ERROR",
            AppError::Internal { .. } => "INTERNAL_ERROR",
            AppError::ConfigError { .. } => "CONFIG_ERROR",
            AppError::RouteNotFound { .. } => "NOT_FOUND",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UploadRejected { .. } => StatusCode::BAD_REQUEST,
            AppError::FileTooLarge { .. } => StatusCode::BAD_REQUEST,
            AppError::ExtractionError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::PersistenceError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// JSON body sent to the client for this error.
    pub fn body(&self) -> Value {
        match self {
            AppError::UploadRejected { message } => json!({ "error": message }),
            AppError::FileTooLarge { .. } => json!({ "error": self.to_string() }),
            AppError::ExtractionError { message } => json!({
                "error": "Failed to process PDF file",
                "details": message
            }),
            AppError::ValidationError { .. } => json!({
                "error": "Missing required fields",
                "required": REQUIRED_INTERVIEW_FIELDS
            }),
            AppError::PersistenceError { message } => json!({
                "error": "Failed to save interview data",
                "details": message
            }),
            AppError::Internal { message } | AppError::ConfigError { message } => json!({
                "error": "Internal Server Error",
                "message": message
            }),
            AppError::RouteNotFound { .. } => json!({
                "error": "Not Found",
                "message": self.to_string()
            }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let error_id = Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                error_code = error_code,
                status_code = %status,
                error_id = %error_id,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                error_code = error_code,
                status_code = %status,
                error_id = %error_id,
                error_message = %self,
                "Request rejected"
            );
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::Internal {
            message: rejection.body_text(),
        }
    }
}

impl From<tokio_postgres::Error> for AppError {
    fn from(err: tokio_postgres::Error) -> Self {
        let message = match err.as_db_error() {
            Some(db_err) => db_err.message().to_string(),
            None => err.to_string(),
        };
        AppError::PersistenceError { message }
    }
}

impl From<deadpool_postgres::PoolError> for AppError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        AppError::PersistenceError {
            message: format!("Storage unavailable: {}", err),
        }
    }
}

impl AppError {
    pub fn upload_rejected(message: impl Into<String>) -> Self {
        AppError::UploadRejected {
            message: message.into(),
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        AppError::ExtractionError {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        AppError::PersistenceError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError {
            message: message.into(),
        }
    }

    pub fn route_not_found(method: impl Into<String>, path: impl Into<String>) -> Self {
        AppError::RouteNotFound {
            method: method.into(),
            path: path.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }
}
