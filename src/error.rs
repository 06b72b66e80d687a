//! Error types for Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Creation payload is missing required fields; carries every absent field
    #[error("Missing required fields: {0:?}")]
    MissingFields(Vec<String>),

    /// Borrow target is absent or already borrowed. The two cases are
    /// deliberately collapsed into one response; see the borrow contract.
    #[error("Book not available")]
    NotAvailable,

    /// Return target does not exist
    #[error("No book exist with this ISBN")]
    NoSuchBook,

    /// Return target is already available
    #[error("Book already available")]
    AlreadyAvailable,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Raw underlying error message, present on infrastructure failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Absent required fields, present on validation failures only
    #[serde(rename = "missingFields", skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: "Missing required fields".to_string(),
                    error: None,
                    missing_fields: Some(fields),
                },
            ),
            AppError::NotAvailable => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    message: "Book not available".to_string(),
                    error: None,
                    missing_fields: None,
                },
            ),
            AppError::NoSuchBook => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    message: "No book exist with this ISBN".to_string(),
                    error: None,
                    missing_fields: None,
                },
            ),
            AppError::AlreadyAvailable => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    message: "Book already available".to_string(),
                    error: None,
                    missing_fields: None,
                },
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: "An error occurred".to_string(),
                        error: Some(e.to_string()),
                        missing_fields: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
