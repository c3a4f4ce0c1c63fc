//! Signed session tokens.
//!
//! A session is a self-contained credential: the claims are serialized to
//! JSON, signed with HMAC-SHA256 under the server-held session secret, and
//! transported as `base64url(payload).base64url(signature)`. Verification is
//! stateless (signature first, then expiry), so no session table exists and
//! a token cannot be revoked before its expiry.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use azur_core::{AdminId, Email};

use crate::models::AdminIdentity;

/// Session lifetime in seconds (7 days). The session cookie's `Max-Age`
/// mirrors this value.
pub const SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

type HmacSha256 = Hmac<Sha256>;

/// Claims carried by every session token.
///
/// The identity fields are embedded so protected requests resolve the
/// administrator without a database read. A renamed or deleted administrator
/// keeps the old identity until the token expires, accepted for the
/// single-admin scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Administrator id the session was issued to.
    pub sub: AdminId,
    /// Administrator's email at issue time.
    pub email: Email,
    /// Administrator's display name at issue time.
    pub name: String,
    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds). `now == exp` counts as expired.
    pub exp: i64,
}

impl SessionClaims {
    /// The identity these claims resolve to.
    #[must_use]
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            id: self.sub,
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Signs and verifies session tokens with the server-held secret.
pub struct TokenSigner {
    secret: SecretString,
}

impl TokenSigner {
    /// Create a signer from the configured session secret.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length")
    }

    /// Sign claims into a transportable token.
    #[must_use]
    pub fn sign(&self, claims: &SessionClaims) -> String {
        let payload = serde_json::to_vec(claims)
            .unwrap_or_else(|_| unreachable!("session claims are plain data"));

        let mut mac = self.mac();
        mac.update(&payload);
        let signature = mac.finalize().into_bytes();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }

    /// Verify a token and return its claims, or `None` for any malformed,
    /// forged, or expired token. Never panics on untrusted input.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        self.verify_at(token, Utc::now().timestamp())
    }

    fn verify_at(&self, token: &str, now: i64) -> Option<SessionClaims> {
        let (payload_b64, signature_b64) = token.split_once('.')?;
        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

        // The signature must check out before the payload is trusted at all.
        let mut mac = self.mac();
        mac.update(&payload);
        mac.verify_slice(&signature).ok()?;

        let claims: SessionClaims = serde_json::from_slice(&payload).ok()?;
        if now >= claims.exp {
            return None;
        }

        Some(claims)
    }
}
