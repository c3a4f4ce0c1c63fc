//! Partner brand list document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApplyError, FieldMap, ValidationError};
use crate::types::EntryId;

/// The ordered list of partner brands shown on the site.
///
/// List document. `next_id` is the persisted id counter: ids are assigned
/// on creation, strictly increase, and are never reused after deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brands {
    pub next_id: i64,
    pub items: Vec<Brand>,
}

impl Default for Brands {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: Vec::new(),
        }
    }
}

/// One partner brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: EntryId,
    pub name: String,
    pub logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Validated entry payload for [`Brands`].
///
/// Without an `id` the entry is appended (requires `name` and `logo`);
/// with an `id` the present fields update the matching entry.
#[derive(Debug, Default)]
pub struct BrandEntry {
    pub id: Option<EntryId>,
    pub name: Option<String>,
    pub logo: Option<String>,
    pub website: Option<String>,
}

impl BrandEntry {
    /// Validate a raw payload against the entry shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first offending field.
    pub fn parse(payload: Value) -> Result<Self, ValidationError> {
        let mut fields = FieldMap::root(payload)?;
        let entry = Self {
            id: fields.take("id", "an integer")?,
            name: fields.take("name", "a string")?,
            logo: fields.take("logo", "a string")?,
            website: fields.take("website", "a string")?,
        };
        fields.finish()?;
        Ok(entry)
    }
}

impl Brands {
    /// Append a new brand or update an existing one by id.
    ///
    /// Returns the id of the affected entry. Insertion order is preserved;
    /// a fresh id is always distinct from every id ever assigned.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::EntryNotFound`] when `entry.id` names no entry,
    /// or a validation error when a new entry misses a required field.
    pub fn upsert(&mut self, entry: BrandEntry) -> Result<EntryId, ApplyError> {
        if let Some(id) = entry.id {
            let item = self
                .items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or(ApplyError::EntryNotFound(id))?;
            if let Some(name) = entry.name {
                item.name = name;
            }
            if let Some(logo) = entry.logo {
                item.logo = logo;
            }
            if let Some(website) = entry.website {
                item.website = Some(website);
            }
            return Ok(id);
        }

        let name = entry
            .name
            .ok_or_else(|| ValidationError::MissingField("name".to_owned()))?;
        let logo = entry
            .logo
            .ok_or_else(|| ValidationError::MissingField("logo".to_owned()))?;

        let id = self.fresh_id();
        self.items.push(Brand {
            id,
            name,
            logo,
            website: entry.website,
        });
        Ok(id)
    }

    /// Remove an entry by id. Returns `false` when the id is absent;
    /// surviving entries keep their ids.
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

    fn add(doc: &mut Brands, name: &str) -> EntryId {
        doc.upsert(BrandEntry::parse(json!({"name": name, "logo": format!("/logos/{name}.png")})).unwrap())
            .unwrap()
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let mut doc = Brands::default();
        let first = add(&mut doc, "Bosch");
        let second = add(&mut doc, "Siemens");

        assert_eq!(first, EntryId::new(1));
        assert_eq!(second, EntryId::new(2));
        assert_eq!(doc.items.len(), 2);
    }

    #[test]
    fn test_identical_payloads_get_distinct_ids() {
        let mut doc = Brands::default();
        let payload = json!({"name": "Acme", "logo": "/x.png"});

        let a = doc.upsert(BrandEntry::parse(payload.clone()).unwrap()).unwrap();
        let b = doc.upsert(BrandEntry::parse(payload).unwrap()).unwrap();

        assert_ne!(a, b);
        assert_eq!(doc.items.len(), 2);
    }

    #[test]
    fn test_ids_are_never_reused_after_removal() {
        let mut doc = Brands::default();
        add(&mut doc, "Bosch");
        let second = add(&mut doc, "Siemens");

        assert!(doc.remove(second));
        let third = add(&mut doc, "Miele");

        assert_eq!(third, EntryId::new(3));
    }

    #[test]
    fn test_remove_missing_id_is_a_noop() {
        let mut doc = Brands::default();
        add(&mut doc, "Bosch");
        let before = doc.clone();

        assert!(!doc.remove(EntryId::new(99)));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_keeps_other_ids() {
        let mut doc = Brands::default();
        let first = add(&mut doc, "Bosch");
        let second = add(&mut doc, "Siemens");
        let third = add(&mut doc, "Miele");

        assert!(doc.remove(second));

        let ids: Vec<EntryId> = doc.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[test]
    fn test_update_by_id_merges_present_fields() {
        let mut doc = Brands::default();
        let id = add(&mut doc, "Bosch");

        let entry = BrandEntry::parse(json!({"id": id, "website": "https://bosch.fr"})).unwrap();
        assert_eq!(doc.upsert(entry).unwrap(), id);

        let item = &doc.items[0];
        assert_eq!(item.name, "Bosch");
        assert_eq!(item.website.as_deref(), Some("https://bosch.fr"));
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let mut doc = Brands::default();
        let entry = BrandEntry::parse(json!({"id": 5, "name": "Acme"})).unwrap();
        assert_eq!(
            doc.upsert(entry).unwrap_err(),
            ApplyError::EntryNotFound(EntryId::new(5))
        );
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_new_entry_requires_name_and_logo() {
        let mut doc = Brands::default();

        let entry = BrandEntry::parse(json!({"logo": "/x.png"})).unwrap();
        assert_eq!(
            doc.upsert(entry).unwrap_err(),
            ApplyError::Validation(ValidationError::MissingField("name".to_owned()))
        );

        let entry = BrandEntry::parse(json!({"name": "Acme"})).unwrap();
        assert_eq!(
            doc.upsert(entry).unwrap_err(),
            ApplyError::Validation(ValidationError::MissingField("logo".to_owned()))
        );
    }

    #[test]
    fn test_entry_rejects_unknown_field() {
        let err = BrandEntry::parse(json!({"name": "Acme", "logo": "/x.png", "color": "red"}))
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownField("color".to_owned()));
    }

    #[test]
    fn test_entry_rejects_bad_id_type() {
        let err = BrandEntry::parse(json!({"id": "one"})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidType {
                field: "id".to_owned(),
                expected: "an integer",
            }
        );
    }

    #[test]
    fn test_fresh_id_recovers_from_lagging_counter() {
        let mut doc = Brands {
            next_id: 1,
            items: vec![Brand {
                id: EntryId::new(4),
                name: "Bosch".to_owned(),
                logo: "/bosch.png".to_owned(),
                website: None,
            }],
        };

        let id = add(&mut doc, "Siemens");
        assert_eq!(id, EntryId::new(5));
    }
}
