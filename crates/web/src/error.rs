use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use importer::ImporterError;
use serde_json::json;
use std::fmt;
use storage::StorageError;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Importer(ImporterError),
    BadRequest(String),
    InternalServerError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Importer(e) => write!(f, "Importer error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Importer(ImporterError::EmptyResultSet) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Importer(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Importer(ImporterError::EmptyResultSet) => {
                json!({
                    "error": ImporterError::EmptyResultSet.to_string()
                })
            }
            Self::Importer(e) => {
                tracing::error!("Importer error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                json!({
                    "error": "An internal error occurred"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ImporterError> for WebError {
    fn from(error: ImporterError) -> Self {
        match error {
            ImporterError::StorageError(e) => Self::Storage(e),
            other => Self::Importer(other),
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;
