//! Administrator account provisioning.
//!
//! # Usage
//!
//! ```bash
//! azur admin create -e admin@azur-services.fr -n "Admin" -p <password>
//! ```
//!
//! The API never creates accounts; this command is the only provisioning
//! path. Passwords are hashed with Argon2id before they touch the database.
//!
//! # Environment Variables
//!
//! - `AZUR_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use sqlx::PgPool;
use thiserror::Error;

use azur_api::auth::hash_password;
use azur_api::db::{AdminRepository, RepositoryError};
use azur_core::Email;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during administrator provisioning.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Password does not meet requirements.
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Password hashing failed.
    #[error("Password hashing failed")]
    Hash,

    /// Account already exists.
    #[error("Administrator already exists with email: {0}")]
    AccountExists(String),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

/// Create a new administrator account.
///
/// # Arguments
///
/// * `email` - Administrator's email address (stored lowercased)
/// * `name` - Administrator's display name
/// * `password` - Plaintext password, hashed before storage
///
/// # Returns
///
/// The ID of the created account.
///
/// # Errors
///
/// Fails on invalid input, duplicate email, or database errors.
pub async fn create_account(email: &str, name: &str, password: &str) -> Result<i64, AdminError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email).map_err(|e| AdminError::InvalidEmail(e.to_string()))?;

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AdminError::WeakPassword);
    }

    let database_url =
        super::database_url().ok_or(AdminError::MissingEnvVar("AZUR_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating administrator: {} ({})", name, email);

    let password_hash = hash_password(password).map_err(|_| AdminError::Hash)?;

    let account = AdminRepository::new(&pool)
        .create(&email, name, &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AdminError::AccountExists(email.to_string()),
            other => AdminError::Repository(other),
        })?;

    tracing::info!(
        "Administrator created successfully! ID: {}, Email: {}",
        account.id,
        account.email
    );

    Ok(account.id.as_i64())
}
