//! Administrator authentication service.
//!
//! Password login against the credential store plus stateless session
//! tokens. Passwords are hashed with Argon2id; session tokens are signed
//! with HMAC-SHA256 (see [`token`]).

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{SESSION_TTL_SECONDS, SessionClaims, TokenSigner};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sqlx::PgPool;

use azur_core::Email;

use crate::db::AdminRepository;
use crate::models::AdminIdentity;

/// Authentication service.
///
/// Verifies credentials against the administrator repository and mints
/// session tokens with the shared [`TokenSigner`].
pub struct AuthService<'a> {
    admins: AdminRepository<'a>,
    signer: &'a TokenSigner,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, signer: &'a TokenSigner) -> Self {
        Self {
            admins: AdminRepository::new(pool),
            signer,
        }
    }

    /// Verify an email/password pair and mint a session token.
    ///
    /// Returns the administrator's identity and the signed token. The
    /// password hash never leaves this service.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the email is malformed,
    /// unknown, or the password does not match: one indistinguishable
    /// failure for all three.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AdminIdentity, String), AuthError> {
        // A malformed email cannot match a stored account; same failure as
        // a wrong password.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .admins
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &account.password_hash)?;

        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: account.id,
            email: account.email,
            name: account.name,
            iat: now,
            exp: now + SESSION_TTL_SECONDS,
        };
        let token = self.signer.sign(&claims);

        Ok((claims.identity(), token))
    }

    /// Resolve a session token to an identity without touching the
    /// credential store. `None` for any invalid or expired token.
    #[must_use]
    pub fn verify(&self, session_token: &str) -> Option<AdminIdentity> {
        self.signer
            .verify(session_token)
            .map(|claims| claims.identity())
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash (constant-time).
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` when the hash is unparsable or
/// the password does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();

        assert!(verify_password("correct horse battery staple", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
