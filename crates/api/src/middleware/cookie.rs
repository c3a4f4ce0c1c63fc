//! Session cookie handling.
//!
//! The signed session token travels in an HTTP-only cookie with
//! `SameSite=Strict` and a `Max-Age` mirroring the token TTL. `Secure` is
//! set when the configured base URL is https. Logout replaces the cookie
//! with an immediately expiring one; the token itself stays valid until its
//! expiry (no server-side revocation).

use axum::http::{HeaderMap, header};

use crate::auth::SESSION_TTL_SECONDS;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "azur_admin_session";

/// Build the `Set-Cookie` value delivering a fresh session token.
#[must_use]
pub fn session_cookie(token: &str, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; Max-Age={SESSION_TTL_SECONDS}; HttpOnly; SameSite=Strict{secure_attr}"
    )
}

/// Build the `Set-Cookie` value clearing the session cookie (logout).
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE_NAME}=; Path=/; Max-Age=0; HttpOnly; SameSite=Strict{secure_attr}"
    )
}

/// Extract the session token from the request's `Cookie` headers, if any.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok.sig", true);
        assert!(cookie.starts_with("azur_admin_session=tok.sig;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains(&format!("Max-Age={SESSION_TTL_SECONDS}")));
    }

    #[test]
    fn test_secure_attribute_follows_flag() {
        assert!(!session_cookie("t", false).contains("Secure"));
        assert!(!clear_session_cookie(false).contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(true);
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.starts_with("azur_admin_session=;"));
    }

    #[test]
    fn test_extract_token_from_cookie_header() {
        let headers = headers_with_cookie("azur_admin_session=abc.def");
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_extract_token_among_other_cookies() {
        let headers =
            headers_with_cookie("theme=dark; azur_admin_session=abc.def; lang=fr");
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_no_cookie_header() {
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_other_cookies_only() {
        let headers = headers_with_cookie("theme=dark; lang=fr");
        assert_eq!(session_token(&headers), None);
    }
}
