//! Homepage copy document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FieldMap, ValidationError};

/// Editable homepage copy.
///
/// Scalar document with three nested sections. The public renderer reads it
/// on every homepage request; the admin UI edits it section by section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Homepage {
    pub hero: Hero,
    pub intro: Intro,
    pub cta: CallToAction,
}

/// Above-the-fold hero block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub image: String,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            title: "Azur Services".to_owned(),
            subtitle: String::new(),
            image: String::new(),
        }
    }
}

/// Introduction block below the hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Intro {
    pub title: String,
    pub body: String,
}

/// Call-to-action banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallToAction {
    pub label: String,
    pub url: String,
}

impl Default for CallToAction {
    fn default() -> Self {
        Self {
            label: "Demander un devis".to_owned(),
            url: "/quote".to_owned(),
        }
    }
}

/// Validated partial update for [`Homepage`].
#[derive(Debug, Default)]
pub struct HomepagePatch {
    hero: Option<HeroPatch>,
    intro: Option<IntroPatch>,
    cta: Option<CallToActionPatch>,
}

#[derive(Debug, Default)]
struct HeroPatch {
    title: Option<String>,
    subtitle: Option<String>,
    image: Option<String>,
}

#[derive(Debug, Default)]
struct IntroPatch {
    title: Option<String>,
    body: Option<String>,
}

#[derive(Debug, Default)]
struct CallToActionPatch {
    label: Option<String>,
    url: Option<String>,
}

impl HomepagePatch {
    /// Validate a raw payload against the document shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first offending field.
    pub fn parse(payload: Value) -> Result<Self, ValidationError> {
        let mut fields = FieldMap::root(payload)?;
        let mut patch = Self::default();

        if let Some(mut section) = fields.take_section("hero")? {
            patch.hero = Some(HeroPatch {
                title: section.take("title", "a string")?,
                subtitle: section.take("subtitle", "a string")?,
                image: section.take("image", "a string")?,
            });
            section.finish()?;
        }

        if let Some(mut section) = fields.take_section("intro")? {
            patch.intro = Some(IntroPatch {
                title: section.take("title", "a string")?,
                body: section.take("body", "a string")?,
            });
            section.finish()?;
        }

        if let Some(mut section) = fields.take_section("cta")? {
            patch.cta = Some(CallToActionPatch {
                label: section.take("label", "a string")?,
                url: section.take("url", "a string")?,
            });
            section.finish()?;
        }

        fields.finish()?;
        Ok(patch)
    }
}

impl Homepage {
    /// Merge a validated patch into the document. Absent sections and fields
    /// keep their current value.
    pub fn apply(&mut self, patch: HomepagePatch) {
        if let Some(hero) = patch.hero {
            if let Some(value) = hero.title {
                self.hero.title = value;
            }
            if let Some(value) = hero.subtitle {
                self.hero.subtitle = value;
            }
            if let Some(value) = hero.image {
                self.hero.image = value;
            }
        }
        if let Some(intro) = patch.intro {
            if let Some(value) = intro.title {
                self.intro.title = value;
            }
            if let Some(value) = intro.body {
                self.intro.body = value;
            }
        }
        if let Some(cta) = patch.cta {
            if let Some(value) = cta.label {
                self.cta.label = value;
            }
            if let Some(value) = cta.url {
                self.cta.url = value;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_section_merge_keeps_sibling_fields() {
        let mut doc = Homepage::default();
        doc.hero.subtitle = "Intervention sous 24h".to_owned();

        let patch = HomepagePatch::parse(json!({"hero": {"title": "Votre artisan local"}})).unwrap();
        doc.apply(patch);

        assert_eq!(doc.hero.title, "Votre artisan local");
        assert_eq!(doc.hero.subtitle, "Intervention sous 24h");
    }

    #[test]
    fn test_other_sections_untouched() {
        let mut doc = Homepage::default();
        let cta_before = doc.cta.clone();

        let patch = HomepagePatch::parse(json!({"intro": {"body": "Depuis 2008."}})).unwrap();
        doc.apply(patch);

        assert_eq!(doc.intro.body, "Depuis 2008.");
        assert_eq!(doc.cta, cta_before);
    }

    #[test]
    fn test_empty_patch_is_a_noop() {
        let mut doc = Homepage::default();
        let before = doc.clone();

        doc.apply(HomepagePatch::parse(json!({})).unwrap());

        assert_eq!(doc, before);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = HomepagePatch::parse(json!({"footer": {}})).unwrap_err();
        assert_eq!(err, ValidationError::UnknownField("footer".to_owned()));
    }

    #[test]
    fn test_wrong_type_in_section_names_dotted_path() {
        let err = HomepagePatch::parse(json!({"cta": {"label": []}})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidType {
                field: "cta.label".to_owned(),
                expected: "a string",
            }
        );
    }
}
