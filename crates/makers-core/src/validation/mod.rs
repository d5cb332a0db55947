//! Validation modules

pub mod file;
pub mod limits;
pub mod link;

pub use file::{validate_image_file, DEFAULT_IMAGE_CONTENT_TYPES};
pub use limits::{char_count, is_over_limit, remaining_chars, validate_text};
pub use link::validate_link;

use crate::models::DraftField;

/// A local validation failure. Blocks step advancement or submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(DraftField),

    #[error("{field} must be at most {max} characters ({actual} given)")]
    TooLong {
        field: DraftField,
        max: usize,
        actual: usize,
    },

    #[error("Invalid link: {0}")]
    InvalidLink(String),

    #[error("An icon is required")]
    MissingIcon,

    #[error("At least one screenshot is required")]
    MissingScreenshots,

    #[error("At most {max} screenshots are allowed")]
    TooManyScreenshots { max: usize },

    #[error("Invalid file: {0}")]
    InvalidFile(String),

    #[error("Submission is not valid: {0}")]
    InvalidSubmission(String),
}
