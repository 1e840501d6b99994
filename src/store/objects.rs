use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::store::StoreError;

/// Key under which a flower image uploaded at `now` is stored.
pub fn image_key(now: DateTime<Utc>) -> String {
    format!("flowers/{}-img.jpg", now.timestamp_millis())
}

/// Blob storage for flower images.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key` and returns a URL the object can be fetched from.
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String, StoreError>;
}

/// Object store kept in memory; URLs are `{base_url}/{key}`.
pub struct MemoryObjectStore {
    base_url: String,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(key).cloned()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<String, StoreError> {
        if bytes.is_empty() {
            return Err(StoreError::Backend(format!("refusing empty upload for '{key}'")));
        }
        log::info!("storing object {key} ({} bytes)", bytes.len());
        self.objects.write().await.insert(key.to_string(), bytes);
        Ok(format!("{}/{}", self.base_url, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_image_key_uses_epoch_millis() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(image_key(now), "flowers/1700000000123-img.jpg");
    }

    #[tokio::test]
    async fn test_upload_returns_url_and_keeps_bytes() {
        let store = MemoryObjectStore::new("https://cdn.example/");
        let url = store.upload("flowers/1-img.jpg", vec![1, 2, 3]).await.unwrap();
        assert_eq!(url, "https://cdn.example/flowers/1-img.jpg");
        assert_eq!(store.get("flowers/1-img.jpg").await, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_empty_upload_rejected() {
        let store = MemoryObjectStore::new("memory://objects");
        assert!(store.upload("flowers/1-img.jpg", vec![]).await.is_err());
    }
}
