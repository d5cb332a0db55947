use async_trait::async_trait;
use makers_core::models::LocalFile;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::traits::{AssetStore, SessionStore, StorageError, StorageResult};

/// Create `base_path` if needed and return it
async fn prepare_dir(base_path: PathBuf) -> StorageResult<PathBuf> {
    fs::create_dir_all(&base_path).await.map_err(|e| {
        StorageError::ConfigError(format!(
            "Failed to create storage directory {}: {}",
            base_path.display(),
            e
        ))
    })?;
    Ok(base_path)
}

/// Write `data` to `path` through a temporary sibling and an atomic rename
async fn write_atomically(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp_path).await.map_err(|e| {
        StorageError::BackendError(format!(
            "Failed to create file {}: {}",
            tmp_path.display(),
            e
        ))
    })?;
    file.write_all(data).await.map_err(|e| {
        StorageError::BackendError(format!(
            "Failed to write file {}: {}",
            tmp_path.display(),
            e
        ))
    })?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&tmp_path, path).await?;
    Ok(())
}

/// Session store keeping one JSON file per key in a directory
///
/// Stands in for browser session storage when the wizard runs outside a browser,
/// e.g. from the CLI. Deleting the directory ends the session.
#[derive(Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new FileSessionStore rooted at `base_path`
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = prepare_dir(base_path.into()).await?;
        Ok(FileSessionStore { base_path })
    }

    /// Convert a session key to a file path inside the base directory
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains("..") {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        let file_name = format!("{}.json", urlencoding::encode(key));
        Ok(self.base_path.join(file_name))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> StorageResult<Option<JsonValue>> {
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }

        let data = fs::read(&path).await?;
        let value = serde_json::from_slice(&data)?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: JsonValue) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let data = serde_json::to_vec(&value)?;
        write_atomically(&path, &data).await?;

        tracing::debug!(
            key = %key,
            path = %path.display(),
            size_bytes = data.len(),
            "Session value written"
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await?;
        tracing::debug!(key = %key, "Session value removed");
        Ok(())
    }
}

/// Local filesystem asset store
///
/// Writes uploads under `{base_path}/assets/` and serves them from `base_url`.
#[derive(Clone)]
pub struct LocalAssetStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalAssetStore {
    /// Create a new LocalAssetStore
    ///
    /// # Arguments
    /// * `base_path` - Root directory for asset files (e.g., "/var/lib/makers/assets")
    /// * `base_url` - Base URL the directory is served from (e.g., "http://localhost:3000/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = prepare_dir(base_path.into()).await?;
        Ok(LocalAssetStore {
            base_path,
            base_url,
        })
    }

    /// Generate a unique storage key for an uploaded file
    fn generate_key(file_name: &str) -> String {
        format!("assets/{}-{}", Uuid::new_v4(), sanitize_file_name(file_name))
    }

    /// Generate public URL for a storage key
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

/// Keep ASCII alphanumerics, dots, dashes and underscores; replace everything else
fn sanitize_file_name(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = sanitized.trim_start_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn upload(&self, file: &LocalFile) -> StorageResult<String> {
        if file.data.is_empty() {
            return Err(StorageError::UploadFailed(format!(
                "{} is empty",
                file.file_name
            )));
        }

        let key = Self::generate_key(&file.file_name);
        let path = self.base_path.join(&key);
        let start = std::time::Instant::now();

        write_atomically(&path, &file.data)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        let url = self.generate_url(&key);

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = file.size(),
            content_type = %file.content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local asset upload successful"
        );

        Ok(url)
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn file_session_store_round_trips_values() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path()).await.unwrap();

        assert_eq!(store.get("product-form:create:draft").await.unwrap(), None);

        store
            .set("product-form:create:draft", json!({"name": "Lamp"}))
            .await
            .unwrap();
        assert_eq!(
            store.get("product-form:create:draft").await.unwrap(),
            Some(json!({"name": "Lamp"}))
        );

        // A new handle on the same directory sees the value, like a page reload.
        let reopened = FileSessionStore::new(dir.path()).await.unwrap();
        assert_eq!(
            reopened.get("product-form:create:draft").await.unwrap(),
            Some(json!({"name": "Lamp"}))
        );

        store.remove("product-form:create:draft").await.unwrap();
        store.remove("product-form:create:draft").await.unwrap();
        assert_eq!(store.get("product-form:create:draft").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_session_store_rejects_traversal() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path()).await.unwrap();

        let result = store.set("../escape", json!(1)).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.get("").await, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn file_session_store_reports_corrupt_values() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path()).await.unwrap();
        let path = store.key_to_path("broken").unwrap();
        tokio::fs::write(&path, b"{not json").await.unwrap();

        assert!(matches!(
            store.get("broken").await,
            Err(StorageError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn local_asset_store_writes_and_returns_url() {
        let dir = tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path(), "http://localhost:3000/uploads/".to_string())
            .await
            .unwrap();

        let file = LocalFile::new("My Icon.png", "image/png", b"png bytes".to_vec());
        let url = store.upload(&file).await.unwrap();

        assert!(url.starts_with("http://localhost:3000/uploads/assets/"));
        assert!(url.ends_with("-My_Icon.png"));

        let key = url.trim_start_matches("http://localhost:3000/uploads/");
        let written = tokio::fs::read(dir.path().join(key)).await.unwrap();
        assert_eq!(written, b"png bytes");
    }

    #[tokio::test]
    async fn local_asset_store_rejects_empty_files() {
        let dir = tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path(), "http://localhost/a".to_string())
            .await
            .unwrap();
        let file = LocalFile::new("empty.png", "image/png", bytes::Bytes::new());
        assert!(matches!(
            store.upload(&file).await,
            Err(StorageError::UploadFailed(_))
        ));
    }

    #[test]
    fn sanitize_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("shot 1 (final).webp"), "shot_1__final_.webp");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "file");
    }
}
