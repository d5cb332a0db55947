use validator::ValidateUrl;

use super::limits::LINK_MAX_CHARS;
use super::ValidationError;

/// Validate a product's external link: an absolute http(s) URL.
pub fn validate_link(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();

    if value.chars().count() > LINK_MAX_CHARS {
        return Err(ValidationError::InvalidLink(format!(
            "must be at most {} characters",
            LINK_MAX_CHARS
        )));
    }

    let lower = value.to_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(ValidationError::InvalidLink(
            "must start with http:// or https://".to_string(),
        ));
    }

    if !value.validate_url() {
        return Err(ValidationError::InvalidLink(value.to_string()));
    }

    Ok(())
}
