//! Content document types.
//!
//! The editable site content is a fixed set of named JSON documents, one per
//! [`DocumentKind`]. Each document has a declared shape, a fail-closed
//! [`Default`] used when the backing row is absent, and merge logic for
//! partial updates coming from the admin UI.
//!
//! Two families of documents exist:
//!
//! - **Scalar documents** ([`SiteConfig`], [`Homepage`]): a partial payload
//!   is validated field-by-field against the declared shape and merged into
//!   the current value. Nested sections merge one level down.
//! - **List documents** ([`Brands`], [`Media`], [`Services`]): the payload
//!   is a single entry. Without an `id` it is appended with a freshly
//!   assigned id from the persisted counter; with an `id` it updates the
//!   matching entry. Ids are never reused after deletion and removal never
//!   renumbers the survivors.
//!
//! All logic here is pure: no I/O, no clock, no database. The api crate
//! wires these types to the backing store.

mod brands;
mod homepage;
mod media;
mod services;
mod site_config;

pub use brands::{Brand, BrandEntry, Brands};
pub use homepage::{CallToAction, Hero, Homepage, HomepagePatch, Intro};
pub use media::{Media, MediaEntry, MediaItem};
pub use services::{Service, ServiceEntry, Services};
pub use site_config::{SeoMeta, SiteConfig, SiteConfigPatch, SocialLinks};

use core::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::types::EntryId;

/// The fixed set of content document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// Company-wide configuration: contact details, social links, SEO.
    SiteConfig,
    /// Homepage copy: hero, intro, call to action.
    Homepage,
    /// Partner brand list shown on the site.
    Brands,
    /// Media library references.
    Media,
    /// Service listings.
    Services,
}

impl DocumentKind {
    /// Every document kind, in a stable order.
    pub const ALL: [Self; 5] = [
        Self::SiteConfig,
        Self::Homepage,
        Self::Brands,
        Self::Media,
        Self::Services,
    ];

    /// The kind's wire name, used in URLs and as the storage key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SiteConfig => "site-config",
            Self::Homepage => "homepage",
            Self::Brands => "brands",
            Self::Media => "media",
            Self::Services => "services",
        }
    }

    /// Parse a wire name back into a kind.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Whether this document holds an entry list rather than scalar sections.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::Brands | Self::Media | Self::Services)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected update payload, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The payload was not a JSON object.
    #[error("payload must be a JSON object")]
    NotAnObject,
    /// The payload contains a field the document shape does not declare.
    #[error("unknown field `{0}`")]
    UnknownField(String),
    /// A field is present but holds a value of the wrong type.
    #[error("field `{field}` must be {expected}")]
    InvalidType {
        /// Dotted path of the offending field (e.g. `social.facebook`).
        field: String,
        /// Human-readable expected type.
        expected: &'static str,
    },
    /// A field required to create a new entry is absent.
    #[error("missing required field `{0}`")]
    MissingField(String),
}

impl ValidationError {
    /// The offending field, when one can be named.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotAnObject => None,
            Self::UnknownField(field) | Self::MissingField(field) => Some(field.as_str()),
            Self::InvalidType { field, .. } => Some(field.as_str()),
        }
    }
}

/// Failure to apply an update payload to a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// The payload does not match the document shape.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The payload addressed a list entry that does not exist.
    #[error("entry {0} not found")]
    EntryNotFound(EntryId),
    /// An entry operation was attempted on a scalar document.
    #[error("document `{0}` has no entries")]
    NotAList(DocumentKind),
}

/// Helper for consuming an update payload field-by-field.
///
/// Fields are removed as they are taken; [`FieldMap::finish`] rejects
/// whatever remains, so a payload naming a field outside the declared shape
/// always produces [`ValidationError::UnknownField`]. `null` values are
/// treated as absent.
pub(crate) struct FieldMap {
    prefix: String,
    map: Map<String, Value>,
}

impl FieldMap {
    /// Wrap a payload, requiring it to be a JSON object.
    pub fn root(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self {
                prefix: String::new(),
                map,
            }),
            _ => Err(ValidationError::NotAnObject),
        }
    }

    fn qualify(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_owned()
        } else {
            format!("{}.{name}", self.prefix)
        }
    }

    /// Take a typed field, or `None` when absent or `null`.
    pub fn take<T: DeserializeOwned>(
        &mut self,
        name: &str,
        expected: &'static str,
    ) -> Result<Option<T>, ValidationError> {
        match self.map.remove(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => {
                serde_json::from_value(value)
                    .map(Some)
                    .map_err(|_| ValidationError::InvalidType {
                        field: self.qualify(name),
                        expected,
                    })
            }
        }
    }

    /// Take a nested section as its own `FieldMap`; errors inside the
    /// section name the dotted path.
    pub fn take_section(&mut self, name: &str) -> Result<Option<Self>, ValidationError> {
        match self.map.remove(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Self {
                prefix: self.qualify(name),
                map,
            })),
            Some(_) => Err(ValidationError::InvalidType {
                field: self.qualify(name),
                expected: "an object",
            }),
        }
    }

    /// Reject any fields the caller did not take.
    pub fn finish(self) -> Result<(), ValidationError> {
        let Self { prefix, map } = self;
        // Pick the smallest remaining key so the error is deterministic.
        match map.into_iter().map(|(key, _)| key).min() {
            None => Ok(()),
            Some(key) => {
                let field = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                Err(ValidationError::UnknownField(field))
            }
        }
    }
}

/// A typed content document of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    SiteConfig(SiteConfig),
    Homepage(Homepage),
    Brands(Brands),
    Media(Media),
    Services(Services),
}

impl Document {
    /// The fail-closed default for a kind, served when no row exists yet.
    #[must_use]
    pub fn default_for(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::SiteConfig => Self::SiteConfig(SiteConfig::default()),
            DocumentKind::Homepage => Self::Homepage(Homepage::default()),
            DocumentKind::Brands => Self::Brands(Brands::default()),
            DocumentKind::Media => Self::Media(Media::default()),
            DocumentKind::Services => Self::Services(Services::default()),
        }
    }

    /// Decode a stored raw value into a typed document.
    ///
    /// Fields absent from the stored value fall back to their defaults, so
    /// rows written before a shape gained a field still load.
    ///
    /// # Errors
    ///
    /// Returns the decode error when the stored value does not match the
    /// kind's shape at all.
    pub fn from_stored(kind: DocumentKind, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            DocumentKind::SiteConfig => Self::SiteConfig(serde_json::from_value(value)?),
            DocumentKind::Homepage => Self::Homepage(serde_json::from_value(value)?),
            DocumentKind::Brands => Self::Brands(serde_json::from_value(value)?),
            DocumentKind::Media => Self::Media(serde_json::from_value(value)?),
            DocumentKind::Services => Self::Services(serde_json::from_value(value)?),
        })
    }

    /// The kind of this document.
    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        match self {
            Self::SiteConfig(_) => DocumentKind::SiteConfig,
            Self::Homepage(_) => DocumentKind::Homepage,
            Self::Brands(_) => DocumentKind::Brands,
            Self::Media(_) => DocumentKind::Media,
            Self::Services(_) => DocumentKind::Services,
        }
    }

    /// Encode the document for storage or the wire.
    ///
    /// # Panics
    ///
    /// Document shapes contain only map-representable types, so
    /// serialization cannot fail.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| unreachable!("document shapes are plain data"))
    }

    /// Apply an update payload.
    ///
    /// Scalar documents merge a validated partial; list documents append or
    /// update a single entry (see the module docs).
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::Validation`] for shape mismatches and
    /// [`ApplyError::EntryNotFound`] when an entry id does not exist.
    pub fn apply(&mut self, payload: Value) -> Result<(), ApplyError> {
        match self {
            Self::SiteConfig(doc) => doc.apply(SiteConfigPatch::parse(payload)?),
            Self::Homepage(doc) => doc.apply(HomepagePatch::parse(payload)?),
            Self::Brands(doc) => {
                doc.upsert(BrandEntry::parse(payload)?)?;
            }
            Self::Media(doc) => {
                doc.upsert(MediaEntry::parse(payload)?)?;
            }
            Self::Services(doc) => {
                doc.upsert(ServiceEntry::parse(payload)?)?;
            }
        }
        Ok(())
    }

    /// Remove a list entry by id.
    ///
    /// Returns `false` when no entry carries the id; surviving entries and
    /// their ids are untouched either way.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::NotAList`] for scalar documents.
    pub fn remove_entry(&mut self, id: EntryId) -> Result<bool, ApplyError> {
        match self {
            Self::Brands(doc) => Ok(doc.remove(id)),
            Self::Media(doc) => Ok(doc.remove(id)),
            Self::Services(doc) => Ok(doc.remove(id)),
            Self::SiteConfig(_) | Self::Homepage(_) => Err(ApplyError::NotAList(self.kind())),
        }
    }
}
