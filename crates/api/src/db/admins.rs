//! Administrator account repository.
//!
//! The credential store: lookup is case-insensitive on email; accounts are
//! created only through the provisioning CLI, never by the API itself.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use azur_core::{AdminId, Email};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` administrator queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminAccountRow {
    id: AdminId,
    email: String,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AdminAccountRow> for AdminAccount {
    type Error = RepositoryError;

    fn try_from(row: AdminAccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            email,
            name: row.name,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Domain Type
// =============================================================================

/// An administrator account (domain type).
///
/// Carries the password hash for verification during login; the hash never
/// leaves the auth service.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    /// Unique administrator ID.
    pub id: AdminId,
    /// Administrator's email address.
    pub email: Email,
    /// Administrator's display name.
    pub name: String,
    /// Argon2id password hash (PHC string).
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for administrator account database operations.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new repository backed by the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up an administrator by email, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if the stored row is invalid.
    pub async fn get_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<AdminAccount>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminAccountRow>(
            r"
            SELECT id, email, name, password_hash, created_at, updated_at
            FROM admin_account
            WHERE LOWER(email) = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(AdminAccount::try_from).transpose()
    }

    /// Look up an administrator by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if the stored row is invalid.
    pub async fn get_by_id(&self, id: AdminId) -> Result<Option<AdminAccount>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminAccountRow>(
            r"
            SELECT id, email, name, password_hash, created_at, updated_at
            FROM admin_account
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(AdminAccount::try_from).transpose()
    }

    /// Create an administrator account. Used by the provisioning CLI only.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists,
    /// `Database` for other query failures.
    pub async fn create(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
    ) -> Result<AdminAccount, RepositoryError> {
        let row = sqlx::query_as::<_, AdminAccountRow>(
            r"
            INSERT INTO admin_account (email, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, password_hash, created_at, updated_at
            ",
        )
        .bind(email.as_str())
        .bind(name)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        AdminAccount::try_from(row)
    }
}
