//! Integration tests for the Azur backend.
//!
//! # Running Tests
//!
//! These tests drive a running API over HTTP:
//!
//! ```bash
//! # Run migrations and seed a test administrator
//! cargo run -p azur-cli -- migrate
//! cargo run -p azur-cli -- admin create -e admin@example.com -n "Admin" -p <password>
//!
//! # Start the API, then:
//! AZUR_API_URL=http://localhost:3000 \
//! AZUR_TEST_ADMIN_EMAIL=admin@example.com \
//! AZUR_TEST_ADMIN_PASSWORD=<password> \
//! cargo test -p azur-integration-tests
//! ```
//!
//! Every test skips (with a message) when `AZUR_API_URL` is not set, so the
//! suite stays green in environments without a running server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use serde_json::json;

/// Base URL of the API under test, if configured.
#[must_use]
pub fn base_url() -> Option<String> {
    std::env::var("AZUR_API_URL")
        .ok()
        .map(|url| url.trim_end_matches('/').to_owned())
}

/// Test administrator credentials, if configured.
#[must_use]
pub fn admin_credentials() -> Option<(String, String)> {
    let email = std::env::var("AZUR_TEST_ADMIN_EMAIL").ok()?;
    let password = std::env::var("AZUR_TEST_ADMIN_PASSWORD").ok()?;
    Some((email, password))
}

/// Create an HTTP client with a cookie store, so the session cookie set at
/// login is replayed on subsequent requests.
///
/// # Panics
///
/// Panics if the client cannot be built (test-only code).
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in and return a client holding the session cookie.
///
/// # Panics
///
/// Panics if the login request fails or is rejected (test-only code).
pub async fn authenticated_client(base_url: &str, email: &str, password: &str) -> Client {
    let client = client();

    let response = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(
        response.status().is_success(),
        "login failed with status {}",
        response.status()
    );

    client
}

/// Skip the calling test unless a server (and, when `credentials` is true,
/// a test administrator) is configured. Returns the base URL and the
/// credentials pair.
#[macro_export]
macro_rules! require_server {
    () => {
        match $crate::base_url() {
            Some(url) => url,
            None => {
                eprintln!("AZUR_API_URL not set; skipping integration test");
                return;
            }
        }
    };
    (credentials) => {
        match ($crate::base_url(), $crate::admin_credentials()) {
            (Some(url), Some(credentials)) => (url, credentials),
            _ => {
                eprintln!(
                    "AZUR_API_URL / AZUR_TEST_ADMIN_* not set; skipping integration test"
                );
                return;
            }
        }
    };
}
