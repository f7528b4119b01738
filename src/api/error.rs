use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::types::MessageResponse;
use crate::services::{AuthError, PostError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    /// Duplicate resource. The board's wire contract reports this as a
    /// plain 400, not 409.
    Conflict(String),

    Unauthenticated(String),

    Forbidden(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::ValidationError(msg) | ApiError::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = MessageResponse { message };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => Self::ValidationError(msg),
            AuthError::UsernameTaken => Self::Conflict("Username already exists".to_string()),
            AuthError::UserNotFound => Self::ValidationError("User not found".to_string()),
            AuthError::InvalidPassword => Self::Forbidden("Invalid password".to_string()),
            AuthError::Unauthenticated => Self::Unauthenticated("Missing bearer token".to_string()),
            AuthError::InvalidToken => Self::Forbidden("Invalid token".to_string()),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::NotFound => Self::NotFound("Post not found".to_string()),
            PostError::Forbidden => Self::Forbidden("Not authorized".to_string()),
            PostError::Database(msg) => Self::DatabaseError(msg),
            PostError::Internal(msg) => Self::InternalError(msg),
        }
    }
}
