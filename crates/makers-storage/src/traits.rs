//! Storage abstraction traits
//!
//! This module defines the session store and asset store traits that the draft form
//! manager is written against.

use async_trait::async_trait;
use makers_core::models::LocalFile;
use makers_core::AppError;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UploadFailed(msg) => AppError::Remote(msg),
            StorageError::Serialization(e) => AppError::Serialization(e),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Per-session key/value store for JSON values
///
/// Mirrors browser session storage: values live for one session and are
/// addressed by string keys. Writes are last-write-wins; the store does no
/// locking and expects a single active writer per key.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> StorageResult<Option<JsonValue>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: JsonValue) -> StorageResult<()>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Remote asset store
///
/// Accepts a single binary file and returns its committed, publicly reachable URL.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn upload(&self, file: &LocalFile) -> StorageResult<String>;
}
