use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BlobError, BlobStore};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub public_read: bool,
}

/// Process-local object store, used for local development and tests
pub struct InMemoryBlobStore {
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
    fail_deletes: bool,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
            fail_deletes: false,
        }
    }

    /// A store whose deletes always fail, for exercising cleanup paths
    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::new()
        }
    }

    pub async fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        public_read: bool,
    ) -> Result<(), BlobError> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
                public_read,
            },
        );
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), BlobError> {
        if self.fail_deletes {
            return Err(BlobError::Delete(format!("refusing to delete {}", key)));
        }

        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|object| object.bytes.clone())
            .ok_or_else(|| BlobError::NotFound(key.to_string()))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}
