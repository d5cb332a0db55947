//! Asset references: icons and screenshots attached to a draft.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file picked by the user that has not been uploaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl LocalFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Either a pending local file or a committed remote URL.
///
/// A reference moves from `Pending` to `Uploaded` once, after a successful
/// upload. It only goes away again through explicit removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRef {
    Pending(LocalFile),
    Uploaded { url: String },
}

impl AssetRef {
    pub fn uploaded(url: impl Into<String>) -> Self {
        AssetRef::Uploaded { url: url.into() }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AssetRef::Pending(_))
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            AssetRef::Uploaded { url } => Some(url),
            AssetRef::Pending(_) => None,
        }
    }

    pub fn pending_file(&self) -> Option<&LocalFile> {
        match self {
            AssetRef::Pending(file) => Some(file),
            AssetRef::Uploaded { .. } => None,
        }
    }
}

/// Response of the asset upload endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
