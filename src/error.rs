// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::models::view::Section;

/// Global Application Error Enum.
/// Every variant except `InternalServerError` carries a user-facing notice.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error (store backend failures)
    InternalServerError(String),

    // 400 Bad Request (blank fields, out-of-range indices, quiz not live)
    BadRequest(String),

    // 401 Unauthorized (no current student / teacher); the body names the login section
    LoginRequired(String, Section),

    // 403 Forbidden (quiz owned by another teacher)
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (an exam is already in progress)
    Conflict(String),
}

impl AppError {
    /// The notice shown to the user.
    pub fn notice(&self) -> &str {
        match self {
            AppError::InternalServerError(msg)
            | AppError::BadRequest(msg)
            | AppError::LoginRequired(msg, _)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON `{"error": ...}` body with the matching status.
/// A missing session also carries `"section"` so the client can open the login form.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::LoginRequired(msg, section) = self {
            let body = Json(json!({
                "error": msg,
                "section": section,
            }));
            return (StatusCode::UNAUTHORIZED, body).into_response();
        }

        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::LoginRequired(msg, _) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Allows using `?` on store backend queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

/// Only our own records are serialized, so a failure here is a bug, not bad input.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
