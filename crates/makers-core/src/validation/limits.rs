//! Character ceilings for product text fields.
//!
//! Lengths are counted in Unicode scalar values, not bytes.

use super::ValidationError;
use crate::models::DraftField;

pub const NARRATIVE_MAX_CHARS: usize = 300;
pub const NAME_MAX_CHARS: usize = 100;
pub const TAGLINE_MAX_CHARS: usize = 300;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
pub const LINK_MAX_CHARS: usize = 2048;
pub const MAX_SCREENSHOTS: usize = 6;

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

/// Characters left before `ceiling`; zero once the value is at or over it.
pub fn remaining_chars(value: &str, ceiling: usize) -> usize {
    ceiling.saturating_sub(char_count(value))
}

pub fn is_over_limit(value: &str, ceiling: usize) -> bool {
    char_count(value) > ceiling
}

/// Check a value against its ceiling and, if `required`, reject blank input.
pub fn validate_text(
    field: DraftField,
    value: &str,
    ceiling: usize,
    required: bool,
) -> Result<(), ValidationError> {
    if required && value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }

    let actual = char_count(value);
    if actual > ceiling {
        return Err(ValidationError::TooLong {
            field,
            max: ceiling,
            actual,
        });
    }

    Ok(())
}
