//! Draft model: the locally persisted state of a product submission form.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::validation::limits::{
    DESCRIPTION_MAX_CHARS, LINK_MAX_CHARS, NAME_MAX_CHARS, NARRATIVE_MAX_CHARS,
    TAGLINE_MAX_CHARS,
};

/// Whether the wizard creates a new product or edits an existing one.
///
/// The mode doubles as the draft's identity: create mode has a single draft,
/// edit mode has one draft per product id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "product_id", rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

impl FormMode {
    pub fn product_id(&self) -> Option<Uuid> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(*id),
        }
    }
}

impl Display for FormMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FormMode::Create => write!(f, "create"),
            FormMode::Edit(id) => write!(f, "edit:{}", id),
        }
    }
}

/// Text fields of a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    Tagline,
    Description,
    Link,
    Problem,
    Solution,
    TargetAudience,
    KeyFeatures,
    BusinessModel,
    Roadmap,
}

impl DraftField {
    pub const ALL: [DraftField; 10] = [
        DraftField::Name,
        DraftField::Tagline,
        DraftField::Description,
        DraftField::Link,
        DraftField::Problem,
        DraftField::Solution,
        DraftField::TargetAudience,
        DraftField::KeyFeatures,
        DraftField::BusinessModel,
        DraftField::Roadmap,
    ];

    /// The six narrative sections, in wizard order.
    pub const NARRATIVE: [DraftField; 6] = [
        DraftField::Problem,
        DraftField::Solution,
        DraftField::TargetAudience,
        DraftField::KeyFeatures,
        DraftField::BusinessModel,
        DraftField::Roadmap,
    ];

    pub fn is_narrative(&self) -> bool {
        Self::NARRATIVE.contains(self)
    }

    /// Character ceiling applied when no override is configured.
    pub fn default_max_chars(&self) -> usize {
        match self {
            DraftField::Name => NAME_MAX_CHARS,
            DraftField::Tagline => TAGLINE_MAX_CHARS,
            DraftField::Description => DESCRIPTION_MAX_CHARS,
            DraftField::Link => LINK_MAX_CHARS,
            _ => NARRATIVE_MAX_CHARS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Tagline => "tagline",
            DraftField::Description => "description",
            DraftField::Link => "link",
            DraftField::Problem => "problem",
            DraftField::Solution => "solution",
            DraftField::TargetAudience => "target_audience",
            DraftField::KeyFeatures => "key_features",
            DraftField::BusinessModel => "business_model",
            DraftField::Roadmap => "roadmap",
        }
    }
}

impl Display for DraftField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        DraftField::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| anyhow::anyhow!("Unknown draft field: {}", s))
    }
}

/// Product copy shared by drafts, submissions and product records.
///
/// Length rules are only checked on submission; a draft in progress may hold
/// empty values.
///
/// Narrative ceilings are configurable, so only presence is derived here. The form
/// manager checks the configured ceiling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductFields {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 300,
        message = "Tagline must be between 1 and 300 characters"
    ))]
    pub tagline: String,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description must be between 1 and 2000 characters"
    ))]
    pub description: String,
    #[validate(
        url(message = "Invalid product link"),
        length(max = 2048, message = "Link must be at most 2048 characters")
    )]
    pub link: String,
    #[validate(length(min = 1))]
    pub problem: String,
    #[validate(length(min = 1))]
    pub solution: String,
    #[validate(length(min = 1))]
    pub target_audience: String,
    #[validate(length(min = 1))]
    pub key_features: String,
    #[validate(length(min = 1))]
    pub business_model: String,
    #[validate(length(min = 1))]
    pub roadmap: String,
}

impl ProductFields {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Tagline => &self.tagline,
            DraftField::Description => &self.description,
            DraftField::Link => &self.link,
            DraftField::Problem => &self.problem,
            DraftField::Solution => &self.solution,
            DraftField::TargetAudience => &self.target_audience,
            DraftField::KeyFeatures => &self.key_features,
            DraftField::BusinessModel => &self.business_model,
            DraftField::Roadmap => &self.roadmap,
        }
    }

    pub fn get_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.name,
            DraftField::Tagline => &mut self.tagline,
            DraftField::Description => &mut self.description,
            DraftField::Link => &mut self.link,
            DraftField::Problem => &mut self.problem,
            DraftField::Solution => &mut self.solution,
            DraftField::TargetAudience => &mut self.target_audience,
            DraftField::KeyFeatures => &mut self.key_features,
            DraftField::BusinessModel => &mut self.business_model,
            DraftField::Roadmap => &mut self.roadmap,
        }
    }
}

/// Draft as written to the session store.
///
/// Only committed asset URLs are kept; pending local files cannot survive a reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedDraft {
    #[serde(flatten)]
    pub fields: ProductFields,
    pub icon_url: Option<String>,
    pub screenshot_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_field_parses_both_spellings() {
        assert_eq!(
            "target-audience".parse::<DraftField>().unwrap(),
            DraftField::TargetAudience
        );
        assert_eq!("Roadmap".parse::<DraftField>().unwrap(), DraftField::Roadmap);
        assert!("price".parse::<DraftField>().is_err());
    }

    #[test]
    fn only_sections_are_narrative() {
        assert!(!DraftField::Tagline.is_narrative());
        assert!(DraftField::BusinessModel.is_narrative());
        assert_eq!(DraftField::Problem.default_max_chars(), 300);
        assert_eq!(DraftField::Name.default_max_chars(), 100);
    }

    #[test]
    fn persisted_draft_tolerates_missing_keys() {
        let draft: PersistedDraft =
            serde_json::from_str(r#"{"name":"Lamp","screenshotUrls":["https://cdn/x.png"]}"#)
                .unwrap();
        assert_eq!(draft.fields.name, "Lamp");
        assert!(draft.icon_url.is_none());
        assert_eq!(draft.screenshot_urls.len(), 1);
    }

    #[test]
    fn form_mode_display_matches_key_layout() {
        let id = Uuid::nil();
        assert_eq!(FormMode::Create.to_string(), "create");
        assert_eq!(
            FormMode::Edit(id).to_string(),
            "edit:00000000-0000-0000-0000-000000000000"
        );
    }
}
