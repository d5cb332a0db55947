pub mod asset;
pub mod draft;
pub mod product;
pub mod vote;

pub use asset::{AssetRef, LocalFile, UploadResponse};
pub use draft::{DraftField, FormMode, PersistedDraft, ProductFields};
pub use product::{Product, ProductSubmission, ProductSummary, SubmitProductResponse};
pub use vote::{ToggleVoteResponse, VoteSnapshot};
