//! Service listings document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApplyError, FieldMap, ValidationError};
use crate::types::EntryId;

/// The services the company offers, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Services {
    pub next_id: i64,
    pub items: Vec<Service>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: Vec::new(),
        }
    }
}

/// One service listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Validated entry payload for [`Services`].
#[derive(Debug, Default)]
pub struct ServiceEntry {
    pub id: Option<EntryId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl ServiceEntry {
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
            description: fields.take("description", "a string")?,
            icon: fields.take("icon", "a string")?,
        };
        fields.finish()?;
        Ok(entry)
    }
}

impl Services {
    /// Append a new service or update an existing one by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::EntryNotFound`] for an unknown id, or a
    /// validation error when a new entry misses `name`.
    pub fn upsert(&mut self, entry: ServiceEntry) -> Result<EntryId, ApplyError> {
        if let Some(id) = entry.id {
            let item = self
                .items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or(ApplyError::EntryNotFound(id))?;
            if let Some(name) = entry.name {
                item.name = name;
            }
            if let Some(description) = entry.description {
                item.description = description;
            }
            if let Some(icon) = entry.icon {
                item.icon = Some(icon);
            }
            return Ok(id);
        }

        let name = entry
            .name
            .ok_or_else(|| ValidationError::MissingField("name".to_owned()))?;

        let id = self.fresh_id();
        self.items.push(Service {
            id,
            name,
            description: entry.description.unwrap_or_default(),
            icon: entry.icon,
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
    fn test_add_and_update() {
        let mut doc = Services::default();
        let id = doc
            .upsert(ServiceEntry::parse(json!({"name": "Plomberie"})).unwrap())
            .unwrap();

        doc.upsert(
            ServiceEntry::parse(json!({
                "id": id,
                "description": "Fuites, robinetterie, chauffe-eau.",
                "icon": "wrench"
            }))
            .unwrap(),
        )
        .unwrap();

        assert_eq!(doc.items[0].name, "Plomberie");
        assert_eq!(doc.items[0].description, "Fuites, robinetterie, chauffe-eau.");
        assert_eq!(doc.items[0].icon.as_deref(), Some("wrench"));
    }

    #[test]
    fn test_add_requires_name() {
        let mut doc = Services::default();
        let entry = ServiceEntry::parse(json!({"description": "x"})).unwrap();
        assert_eq!(
            doc.upsert(entry).unwrap_err(),
            ApplyError::Validation(ValidationError::MissingField("name".to_owned()))
        );
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut doc = Services::default();
        for name in ["Plomberie", "Électricité", "Serrurerie"] {
            doc.upsert(ServiceEntry::parse(json!({"name": name})).unwrap())
                .unwrap();
        }

        let names: Vec<&str> = doc.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Plomberie", "Électricité", "Serrurerie"]);
    }

    #[test]
    fn test_remove_unknown_id_returns_false() {
        let mut doc = Services::default();
        assert!(!doc.remove(EntryId::new(1)));
    }
}
