use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::draft::{PersistedDraft, ProductFields};

/// Product record as returned by the products API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: ProductFields,
    pub icon_url: Option<String>,
    #[serde(default)]
    pub screenshot_urls: Vec<String>,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub has_voted: bool,
    pub maker_username: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Directory entry: the subset of a product shown in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub tagline: String,
    pub icon_url: Option<String>,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub has_voted: bool,
    pub maker_username: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        ProductSummary {
            id: product.id,
            name: product.fields.name.clone(),
            tagline: product.fields.tagline.clone(),
            icon_url: product.icon_url.clone(),
            vote_count: product.vote_count,
            has_voted: product.has_voted,
            maker_username: product.maker_username.clone(),
            created_at: product.created_at,
        }
    }
}

impl From<&Product> for PersistedDraft {
    fn from(product: &Product) -> Self {
        PersistedDraft {
            fields: product.fields.clone(),
            icon_url: product.icon_url.clone(),
            screenshot_urls: product.screenshot_urls.clone(),
        }
    }
}

/// Request body for creating or updating a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductSubmission {
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: ProductFields,
    #[validate(url(message = "Icon must be an uploaded URL"))]
    pub icon_url: String,
    /// The upper bound is configurable and checked by the form manager
    #[validate(length(min = 1, message = "At least one screenshot is required"))]
    pub screenshot_urls: Vec<String>,
}

/// Response of the product create/update endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitProductResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_fields() -> ProductFields {
        ProductFields {
            name: "Inkwell".to_string(),
            tagline: "Notes that write back".to_string(),
            description: "A notebook app".to_string(),
            link: "https://inkwell.example.com".to_string(),
            problem: "Notes rot".to_string(),
            solution: "Resurface them".to_string(),
            target_audience: "Writers".to_string(),
            key_features: "Spaced review".to_string(),
            business_model: "Subscription".to_string(),
            roadmap: "Mobile app".to_string(),
        }
    }

    #[test]
    fn submission_with_complete_fields_validates() {
        let submission = ProductSubmission {
            fields: complete_fields(),
            icon_url: "https://cdn.example.com/icon.png".to_string(),
            screenshot_urls: vec!["https://cdn.example.com/s1.png".to_string()],
        };
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn submission_rejects_empty_text_and_missing_screenshots() {
        let mut fields = complete_fields();
        fields.roadmap.clear();
        let submission = ProductSubmission {
            fields,
            icon_url: "https://cdn.example.com/icon.png".to_string(),
            screenshot_urls: Vec::new(),
        };
        let errors = submission.validate().unwrap_err();
        assert!(errors.errors().contains_key("screenshot_urls"));
        assert!(errors.errors().contains_key("fields"));
    }

    #[test]
    fn submission_serializes_flat_camel_case() {
        let submission = ProductSubmission {
            fields: complete_fields(),
            icon_url: "https://cdn.example.com/icon.png".to_string(),
            screenshot_urls: vec![],
        };
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["targetAudience"], "Writers");
        assert_eq!(value["iconUrl"], "https://cdn.example.com/icon.png");
    }
}
