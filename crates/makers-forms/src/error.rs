use makers_core::validation::ValidationError;
use makers_core::AppError;
use makers_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Leaving the screenshots step requires at least one committed screenshot
    #[error("No screenshot could be uploaded ({failed} of {attempted} uploads failed)")]
    NoScreenshotUploaded { failed: usize, attempted: usize },

    #[error("You must be signed in to submit a product")]
    AuthenticationRequired,

    #[error("Submission failed: {0}")]
    Submission(#[source] AppError),

    #[error("Draft storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Draft could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation(e) => AppError::Validation(e),
            FormError::NoScreenshotUploaded { failed, attempted } => {
                AppError::UploadIncomplete { failed, attempted }
            }
            FormError::AuthenticationRequired => {
                AppError::Unauthorized("sign in to submit a product".to_string())
            }
            FormError::Submission(e) => e,
            FormError::Storage(e) => e.into(),
            FormError::Serialization(e) => AppError::Serialization(e),
        }
    }
}
