//! Unified error handling for the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use azur_core::documents::{ApplyError, ValidationError};

use crate::auth::AuthError;
use crate::db::RepositoryError;
use crate::services::{ContentError, EmailError};

/// Application-level error type for the API.
///
/// Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl
/// turns each variant into a structured JSON error body so the admin UI can
/// distinguish "not logged in" from "fix your input" from "retry later".
#[derive(Debug, Error)]
pub enum ApiError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Login failed. Deliberately indistinguishable between unknown email
    /// and wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Request carried no valid session token.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Update payload does not match the document shape.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::Repository(e) => Self::Database(e),
            AuthError::PasswordHash => Self::Internal("password hashing failed".to_string()),
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Apply(e) => e.into(),
            ContentError::Repository(e) => Self::Database(e),
        }
    }
}

impl From<EmailError> for ApiError {
    fn from(err: EmailError) -> Self {
        Self::Internal(format!("email delivery failed: {err}"))
    }
}

impl From<ApplyError> for ApiError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::Validation(e) => Self::Validation(e),
            ApplyError::EntryNotFound(id) => Self::NotFound(format!("entry {id} not found")),
            ApplyError::NotAList(kind) => {
                Self::BadRequest(format!("document `{kind}` has no entries"))
            }
        }
    }
}

/// JSON error body sent to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let code = match &self {
            Self::Database(_) | Self::Internal(_) => "internal_error",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthenticated => "unauthenticated",
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::Unauthenticated => "Authentication required".to_string(),
            other => other.to_string(),
        };

        let field = match &self {
            Self::Validation(e) => e.field().map(str::to_owned),
            _ => None,
        };

        let body = ErrorBody {
            error: code,
            message,
            field,
        };

        (status, Json(body)).into_response()
    }
}
