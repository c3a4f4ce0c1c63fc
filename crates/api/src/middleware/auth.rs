//! Authentication extractor for protected routes.
//!
//! Resolving "request → identity or none" is a normal branch: a missing or
//! invalid token rejects with a 401 JSON body, never a panic.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;
use crate::middleware::cookie;
use crate::models::AdminIdentity;
use crate::state::AppState;

/// Extractor that requires an authenticated administrator.
///
/// Reads the session cookie and verifies the signed token statelessly;
/// no database access on protected requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub AdminIdentity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = cookie::session_token(&parts.headers).ok_or(ApiError::Unauthenticated)?;

        let identity = state
            .signer()
            .verify(&token)
            .map(|claims| claims.identity())
            .ok_or(ApiError::Unauthenticated)?;

        Ok(Self(identity))
    }
}
