//! Authentication route handlers.
//!
//! Login verifies credentials and sets the session cookie; logout clears
//! the cookie (the token itself expires on its own); `/auth/me` echoes the
//! identity resolved from the cookie.

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use azur_core::documents::ValidationError;

use crate::auth::AuthService;
use crate::error::ApiError;
use crate::middleware::{RequireAdmin, clear_session_cookie, session_cookie};
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

/// Login request body. Fields are optional so their absence is reported as
/// a 400 instead of a generic deserialization rejection.
#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ApiError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation(ValidationError::MissingField(field.to_owned())))
}

/// Verify credentials and open a session.
///
/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = required(body.email.as_deref(), "email")?;
    let password = required(body.password.as_deref(), "password")?;

    let auth = AuthService::new(state.pool(), state.signer());
    let (identity, token) = auth.authenticate(email, password).await?;

    tracing::info!(admin_id = %identity.id, "Administrator logged in");

    let cookie = session_cookie(&token, state.config().cookies_secure());
    Ok(([(header::SET_COOKIE, cookie)], Json(identity)))
}

/// Clear the session cookie.
///
/// POST /auth/logout
///
/// Stateless tokens cannot be revoked server-side; clearing the channel is
/// the whole operation.
async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = clear_session_cookie(state.config().cookies_secure());
    ([(header::SET_COOKIE, cookie)], Json(json!({"ok": true})))
}

/// Return the identity of the current session.
///
/// GET /auth/me
async fn me(RequireAdmin(identity): RequireAdmin) -> impl IntoResponse {
    Json(identity)
}
