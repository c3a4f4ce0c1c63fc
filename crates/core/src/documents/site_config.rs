//! Site configuration document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FieldMap, ValidationError};

/// Company-wide site configuration.
///
/// Scalar document: contact details, social links and default SEO metadata
/// consumed by every public page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub company_name: String,
    pub tagline: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub opening_hours: String,
    pub service_area: String,
    pub social: SocialLinks,
    pub seo: SeoMeta,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            company_name: "Azur Services".to_owned(),
            tagline: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            opening_hours: String::new(),
            service_area: String::new(),
            social: SocialLinks::default(),
            seo: SeoMeta::default(),
        }
    }
}

/// Social profile links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
}

/// Default SEO metadata for pages without their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
}

impl Default for SeoMeta {
    fn default() -> Self {
        Self {
            title: "Azur Services".to_owned(),
            description: String::new(),
        }
    }
}

/// Validated partial update for [`SiteConfig`].
#[derive(Debug, Default)]
pub struct SiteConfigPatch {
    company_name: Option<String>,
    tagline: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    city: Option<String>,
    opening_hours: Option<String>,
    service_area: Option<String>,
    social: Option<SocialLinksPatch>,
    seo: Option<SeoMetaPatch>,
}

#[derive(Debug, Default)]
struct SocialLinksPatch {
    facebook: Option<String>,
    instagram: Option<String>,
    linkedin: Option<String>,
}

#[derive(Debug, Default)]
struct SeoMetaPatch {
    title: Option<String>,
    description: Option<String>,
}

impl SiteConfigPatch {
    /// Validate a raw payload against the document shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first offending field when the
    /// payload is not an object, contains an unknown field, or a field holds
    /// a value of the wrong type.
    pub fn parse(payload: Value) -> Result<Self, ValidationError> {
        let mut fields = FieldMap::root(payload)?;

        let mut patch = Self {
            company_name: fields.take("company_name", "a string")?,
            tagline: fields.take("tagline", "a string")?,
            phone: fields.take("phone", "a string")?,
            email: fields.take("email", "a string")?,
            address: fields.take("address", "a string")?,
            city: fields.take("city", "a string")?,
            opening_hours: fields.take("opening_hours", "a string")?,
            service_area: fields.take("service_area", "a string")?,
            social: None,
            seo: None,
        };

        if let Some(mut section) = fields.take_section("social")? {
            patch.social = Some(SocialLinksPatch {
                facebook: section.take("facebook", "a string")?,
                instagram: section.take("instagram", "a string")?,
                linkedin: section.take("linkedin", "a string")?,
            });
            section.finish()?;
        }

        if let Some(mut section) = fields.take_section("seo")? {
            patch.seo = Some(SeoMetaPatch {
                title: section.take("title", "a string")?,
                description: section.take("description", "a string")?,
            });
            section.finish()?;
        }

        fields.finish()?;
        Ok(patch)
    }
}

impl SiteConfig {
    /// Merge a validated patch into the document. Absent fields keep their
    /// current value.
    pub fn apply(&mut self, patch: SiteConfigPatch) {
        if let Some(value) = patch.company_name {
            self.company_name = value;
        }
        if let Some(value) = patch.tagline {
            self.tagline = value;
        }
        if let Some(value) = patch.phone {
            self.phone = value;
        }
        if let Some(value) = patch.email {
            self.email = value;
        }
        if let Some(value) = patch.address {
            self.address = value;
        }
        if let Some(value) = patch.city {
            self.city = value;
        }
        if let Some(value) = patch.opening_hours {
            self.opening_hours = value;
        }
        if let Some(value) = patch.service_area {
            self.service_area = value;
        }
        if let Some(social) = patch.social {
            if let Some(value) = social.facebook {
                self.social.facebook = value;
            }
            if let Some(value) = social.instagram {
                self.social.instagram = value;
            }
            if let Some(value) = social.linkedin {
                self.social.linkedin = value;
            }
        }
        if let Some(seo) = patch.seo {
            if let Some(value) = seo.title {
                self.seo.title = value;
            }
            if let Some(value) = seo.description {
                self.seo.description = value;
            }
        }
    }
}
