//! Application error type.
//!
//! Every failure in the API resolves to one [`ErrorKind`] at the component
//! boundary. The kind decides the HTTP status; the wrapped [`anyhow::Error`]
//! carries the message rendered to the caller as `{"error": "..."}`.
//!
//! Store and internal failures are logged with their full cause and rendered
//! with a generic message so driver details never reach the client.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

/// Body returned for every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Role gate failed.
    Forbidden,
    /// Course, user, or linked student absent.
    NotFound,
    /// Unique constraint on username or email.
    Conflict,
    /// Missing or unresolvable input.
    Validation,
    /// Bad credentials or bad token.
    Unauthorized,
    /// The backing store failed.
    Store,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict | ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Store | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow::anyhow!(message))
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(ErrorKind::Unauthorized, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Conflict, err)
    }

    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Store, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(ErrorKind::Internal, anyhow::anyhow!(message))
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match self.kind {
            ErrorKind::Store | ErrorKind::Internal => {
                tracing::error!(kind = ?self.kind, error = ?self.error, "Request failed");
                "Internal server error".to_string()
            }
            _ => self.error.to_string(),
        };

        let body = Json(json!({ "error": message }));

        (self.kind.status(), body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
