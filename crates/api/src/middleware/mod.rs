//! Request middleware: the auth gate and session cookie plumbing.

pub mod auth;
pub mod cookie;

pub use auth::RequireAdmin;
pub use cookie::{SESSION_COOKIE_NAME, clear_session_cookie, session_cookie};
