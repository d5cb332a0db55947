use super::ValidationError;
use crate::models::LocalFile;

pub const DEFAULT_IMAGE_CONTENT_TYPES: [&str; 4] =
    ["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Validate a picked image before it is attached to a draft.
pub fn validate_image_file(
    file: &LocalFile,
    allowed_content_types: &[String],
    max_bytes: usize,
) -> Result<(), ValidationError> {
    if file.data.is_empty() {
        return Err(ValidationError::InvalidFile(format!(
            "{} is empty",
            file.file_name
        )));
    }

    if file.size() > max_bytes {
        return Err(ValidationError::InvalidFile(format!(
            "{} is {} bytes, limit is {} bytes",
            file.file_name,
            file.size(),
            max_bytes
        )));
    }

    let content_type = file.content_type.to_lowercase();
    if !allowed_content_types
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(&content_type))
    {
        return Err(ValidationError::InvalidFile(format!(
            "{} has unsupported type {}",
            file.file_name, file.content_type
        )));
    }

    Ok(())
}
