//! Seed default content documents.
//!
//! Inserts the default value for every document kind where no row exists
//! yet (`ON CONFLICT DO NOTHING`), so re-running never overwrites edited
//! content. The API serves the same defaults for absent rows; seeding just
//! makes them visible and editable in the database.
//!
//! # Usage
//!
//! ```bash
//! azur seed content
//! ```
//!
//! # Environment Variables
//!
//! - `AZUR_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use sqlx::PgPool;
use thiserror::Error;

use azur_core::documents::{Document, DocumentKind};

/// Errors that can occur during seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Insert the default document for every kind where absent.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn content() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url().ok_or(SeedError::MissingEnvVar("AZUR_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    for kind in DocumentKind::ALL {
        let default = Document::default_for(kind).to_value();

        let result = sqlx::query(
            r"
            INSERT INTO content_document (kind, value)
            VALUES ($1, $2)
            ON CONFLICT (kind) DO NOTHING
            ",
        )
        .bind(kind.as_str())
        .bind(&default)
        .execute(&pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!(kind = %kind, "Seeded default document");
        } else {
            tracing::info!(kind = %kind, "Document already present, skipped");
        }
    }

    tracing::info!("Content seeding complete!");
    Ok(())
}
