//! Content document store.
//!
//! A key-value persistence surface keyed by [`DocumentKind`], one JSONB row
//! per kind. Writes to the same kind are serialized by a row lock taken in
//! [`ContentRepository::lock_for_update`]; a committed write is visible to
//! every subsequent read, and an abandoned update rolls back without trace.

use serde_json::Value as JsonValue;
use sqlx::{PgPool, Postgres, Transaction};

use azur_core::documents::DocumentKind;

use super::RepositoryError;

/// Repository for content document storage.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new repository backed by the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Read the raw stored value for a kind, or `None` when no row exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn read(&self, kind: DocumentKind) -> Result<Option<JsonValue>, RepositoryError> {
        let value = sqlx::query_scalar::<_, JsonValue>(
            r"
            SELECT value FROM content_document
            WHERE kind = $1
            ",
        )
        .bind(kind.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(value)
    }

    /// Upsert the raw value for a kind outside any read-modify-write cycle.
    ///
    /// Used by the seeding CLI; the API mutates documents through
    /// [`Self::lock_for_update`] instead.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn write(
        &self,
        kind: DocumentKind,
        value: &JsonValue,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO content_document (kind, value)
            VALUES ($1, $2)
            ON CONFLICT (kind) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            ",
        )
        .bind(kind.as_str())
        .bind(value)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Open a read-modify-write cycle for a kind.
    ///
    /// Seeds the row with `default` when absent (`ON CONFLICT DO NOTHING`,
    /// so two concurrent first writers cannot clobber each other), then
    /// takes the row lock. Concurrent updates to the same kind queue behind
    /// the lock; updates to other kinds proceed independently.
    ///
    /// The returned [`ContentTxn`] must be committed with the new value;
    /// dropping it rolls the whole cycle back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn lock_for_update(
        &self,
        kind: DocumentKind,
        default: &JsonValue,
    ) -> Result<ContentTxn, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO content_document (kind, value)
            VALUES ($1, $2)
            ON CONFLICT (kind) DO NOTHING
            ",
        )
        .bind(kind.as_str())
        .bind(default)
        .execute(&mut *tx)
        .await?;

        let value = sqlx::query_scalar::<_, JsonValue>(
            r"
            SELECT value FROM content_document
            WHERE kind = $1
            FOR UPDATE
            ",
        )
        .bind(kind.as_str())
        .fetch_one(&mut *tx)
        .await?;

        Ok(ContentTxn { tx, kind, value })
    }
}

/// An in-flight read-modify-write cycle holding the per-kind row lock.
pub struct ContentTxn {
    tx: Transaction<'static, Postgres>,
    kind: DocumentKind,
    value: JsonValue,
}

impl ContentTxn {
    /// The stored value as of lock acquisition.
    #[must_use]
    pub const fn current(&self) -> &JsonValue {
        &self.value
    }

    /// Persist the new value and release the lock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write or commit fails; the
    /// document is then unchanged.
    pub async fn commit(mut self, value: &JsonValue) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            UPDATE content_document
            SET value = $2, updated_at = NOW()
            WHERE kind = $1
            ",
        )
        .bind(self.kind.as_str())
        .bind(value)
        .execute(&mut *self.tx)
        .await?;

        self.tx.commit().await?;
        Ok(())
    }
}
