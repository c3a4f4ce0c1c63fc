//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness check
//! GET    /health/ready           - Readiness check (verifies database)
//!
//! # Auth
//! POST   /auth/login             - Verify credentials, set session cookie
//! POST   /auth/logout            - Clear session cookie
//! GET    /auth/me                - Identity of the current session
//!
//! # Content (reads public, writes authenticated)
//! GET    /content/{kind}         - Read a document
//! PUT    /content/{kind}         - Partial update / entry upsert
//! DELETE /content/{kind}?id=     - Remove a list entry
//!
//! # Forms (public, forwarded by email)
//! POST   /contact                - Contact message
//! POST   /quote                  - Quote request
//! POST   /intervention           - Intervention request
//! ```

pub mod auth;
pub mod content;
pub mod forms;

use axum::Router;

use crate::state::AppState;

/// Assemble all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(content::router())
        .merge(forms::router())
}
