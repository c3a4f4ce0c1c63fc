//! Content access layer.
//!
//! The only mutator of content documents. Reads fail closed to the kind's
//! default document; updates run inside the store's per-kind row lock so a
//! merge is all-or-nothing and concurrent writers queue instead of clobber.

use serde_json::Value as JsonValue;
use sqlx::PgPool;
use thiserror::Error;

use azur_core::EntryId;
use azur_core::documents::{ApplyError, Document, DocumentKind};

use crate::db::{ContentRepository, RepositoryError};

/// Errors that can occur during content operations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The update payload was rejected or addressed a missing entry.
    #[error(transparent)]
    Apply(#[from] ApplyError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Typed read/update operations over the content store.
pub struct ContentService<'a> {
    content: ContentRepository<'a>,
}

impl<'a> ContentService<'a> {
    /// Create a new content service backed by the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            content: ContentRepository::new(pool),
        }
    }

    /// Read a document, falling back to the kind's default when the backing
    /// row is absent or unreadable, so public rendering never breaks on
    /// missing content.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Repository` only when the store itself is
    /// unreachable.
    pub async fn get(&self, kind: DocumentKind) -> Result<Document, ContentError> {
        match self.content.read(kind).await? {
            None => Ok(Document::default_for(kind)),
            Some(raw) => Ok(decode_or_default(kind, raw)),
        }
    }

    /// Apply an update payload and return the full post-merge document, so
    /// the caller can reconcile its state without a second read.
    ///
    /// Scalar kinds merge a validated partial; list kinds append a new entry
    /// (fresh id) or update one by id. The whole cycle runs under the
    /// per-kind row lock: a rejected payload rolls back and leaves the store
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Apply` for validation failures and unknown
    /// entry ids, `Repository` for store failures.
    pub async fn update(
        &self,
        kind: DocumentKind,
        payload: JsonValue,
    ) -> Result<Document, ContentError> {
        let default = Document::default_for(kind).to_value();
        let txn = self.content.lock_for_update(kind, &default).await?;

        let mut document = decode_or_default(kind, txn.current().clone());
        document.apply(payload)?;

        txn.commit(&document.to_value()).await?;
        Ok(document)
    }

    /// Remove a list entry by id.
    ///
    /// Returns `false` (and persists nothing) when the id is absent;
    /// surviving entries keep their ids either way.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Apply` when the kind is not a list document,
    /// `Repository` for store failures.
    pub async fn remove_entry(
        &self,
        kind: DocumentKind,
        id: EntryId,
    ) -> Result<bool, ContentError> {
        let default = Document::default_for(kind).to_value();
        let txn = self.content.lock_for_update(kind, &default).await?;

        let mut document = decode_or_default(kind, txn.current().clone());
        if !document.remove_entry(id)? {
            // Nothing to persist; dropping the txn rolls back.
            return Ok(false);
        }

        txn.commit(&document.to_value()).await?;
        Ok(true)
    }
}

/// Decode a stored raw value, serving the default when the row predates the
/// current shape so badly it no longer decodes.
fn decode_or_default(kind: DocumentKind, raw: JsonValue) -> Document {
    Document::from_stored(kind, raw).unwrap_or_else(|e| {
        tracing::error!(
            kind = %kind,
            error = %e,
            "stored document does not match its shape; serving default"
        );
        Document::default_for(kind)
    })
}
