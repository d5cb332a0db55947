use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{SessionStore, StorageError, StorageResult};

/// In-memory session store, dropped with the session
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    values: Arc<Mutex<HashMap<String, JsonValue>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, HashMap<String, JsonValue>>> {
        self.values
            .lock()
            .map_err(|_| StorageError::BackendError("session store lock poisoned".to_string()))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> StorageResult<Option<JsonValue>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: JsonValue) -> StorageResult<()> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get("a").await.unwrap(), None);

        store.set("a", json!({"name": "Lamp"})).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(json!({"name": "Lamp"})));

        store.set("a", json!(2)).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(json!(2)));
        assert_eq!(store.len(), 1);

        store.remove("a").await.unwrap();
        store.remove("a").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemorySessionStore::new();
        let other = store.clone();
        store.set("k", json!("v")).await.unwrap();
        assert_eq!(other.get("k").await.unwrap(), Some(json!("v")));
    }
}
