//! Media library document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApplyError, FieldMap, ValidationError};
use crate::types::EntryId;

/// References to uploaded media used across the site.
///
/// List document; the actual files live on the asset host, this only tracks
/// their URLs and alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub next_id: i64,
    pub items: Vec<MediaItem>,
}

impl Default for Media {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: Vec::new(),
        }
    }
}

/// One media reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: EntryId,
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Validated entry payload for [`Media`].
#[derive(Debug, Default)]
pub struct MediaEntry {
    pub id: Option<EntryId>,
    pub url: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

impl MediaEntry {
    /// Validate a raw payload against the entry shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first offending field.
    pub fn parse(payload: Value) -> Result<Self, ValidationError> {
        let mut fields = FieldMap::root(payload)?;
        let entry = Self {
            id: fields.take("id", "an integer")?,
            url: fields.take("url", "a string")?,
            alt: fields.take("alt", "a string")?,
            caption: fields.take("caption", "a string")?,
        };
        fields.finish()?;
        Ok(entry)
    }
}

impl Media {
    /// Append a new media reference or update an existing one by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::EntryNotFound`] for an unknown id, or a
    /// validation error when a new entry misses `url`.
    pub fn upsert(&mut self, entry: MediaEntry) -> Result<EntryId, ApplyError> {
        if let Some(id) = entry.id {
            let item = self
                .items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or(ApplyError::EntryNotFound(id))?;
            if let Some(url) = entry.url {
                item.url = url;
            }
            if let Some(alt) = entry.alt {
                item.alt = alt;
            }
            if let Some(caption) = entry.caption {
                item.caption = Some(caption);
            }
            return Ok(id);
        }

        let url = entry
            .url
            .ok_or_else(|| ValidationError::MissingField("url".to_owned()))?;

        let id = self.fresh_id();
        self.items.push(MediaItem {
            id,
            url,
            alt: entry.alt.unwrap_or_default(),
            caption: entry.caption,
        });
        Ok(id)
    }

    /// Remove an entry by id. Returns `false` when the id is absent.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() < before
    }

    // Ids must stay unique even if a stored counter lags behind the items.
    fn fresh_id(&mut self) -> EntryId {
        let max_used = self
            .items
            .iter()
            .map(|item| item.id.as_i64())
            .max()
            .unwrap_or(0);
        let id = self.next_id.max(max_used + 1);
        self.next_id = id + 1;
        EntryId::new(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_add_requires_url() {
        let mut doc = Media::default();
        let entry = MediaEntry::parse(json!({"alt": "workshop"})).unwrap();
        assert_eq!(
            doc.upsert(entry).unwrap_err(),
            ApplyError::Validation(ValidationError::MissingField("url".to_owned()))
        );
    }

    #[test]
    fn test_add_defaults_alt_to_empty() {
        let mut doc = Media::default();
        let id = doc
            .upsert(MediaEntry::parse(json!({"url": "/img/van.jpg"})).unwrap())
            .unwrap();

        assert_eq!(id, EntryId::new(1));
        assert_eq!(doc.items[0].alt, "");
        assert_eq!(doc.items[0].caption, None);
    }

    #[test]
    fn test_update_by_id() {
        let mut doc = Media::default();
        let id = doc
            .upsert(MediaEntry::parse(json!({"url": "/img/van.jpg", "alt": "van"})).unwrap())
            .unwrap();

        doc.upsert(MediaEntry::parse(json!({"id": id, "caption": "Our van"})).unwrap())
            .unwrap();

        assert_eq!(doc.items[0].url, "/img/van.jpg");
        assert_eq!(doc.items[0].caption.as_deref(), Some("Our van"));
    }

    #[test]
    fn test_remove_roundtrip() {
        let mut doc = Media::default();
        let id = doc
            .upsert(MediaEntry::parse(json!({"url": "/img/van.jpg"})).unwrap())
            .unwrap();

        assert!(doc.remove(id));
        assert!(!doc.remove(id));
        assert!(doc.items.is_empty());
    }
}
