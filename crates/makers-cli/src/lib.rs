use anyhow::Context;
use makers_api_client::ApiClient;
use makers_core::models::LocalFile;
use makers_core::{CurrentUser, StaticSession};
use std::path::Path;
use uuid::Uuid;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Image content type for a file extension
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Read a file from disk into a pending upload
pub async fn read_local_file(path: &Path) -> anyhow::Result<LocalFile> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let content_type = content_type_for(path).unwrap_or("application/octet-stream");

    Ok(LocalFile::new(file_name, content_type, data))
}

/// Session seen by the wizard and vote toggle: signed in whenever the client carries a token.
///
/// The API identifies the user from the token, so the local user record is a placeholder.
pub fn session_for(client: &ApiClient) -> StaticSession {
    if client.is_authenticated() {
        StaticSession::signed_in(CurrentUser {
            id: Uuid::nil(),
            username: "token".to_string(),
        })
    } else {
        StaticSession::anonymous()
    }
}
