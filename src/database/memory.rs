use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DeleteOutcome, PostStore, StoreError};
use crate::post::post_model::Post;

/// Process-local post table, used for local development and tests
#[derive(Default)]
pub struct InMemoryPostStore {
    posts: RwLock<HashMap<String, Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn scan(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.get(id).cloned())
    }

    async fn put(&self, post: &Post) -> Result<(), StoreError> {
        self.posts
            .write()
            .await
            .insert(post.id.clone(), post.clone());
        Ok(())
    }

    async fn delete_if_exists(&self, id: &str) -> Result<DeleteOutcome, StoreError> {
        Ok(match self.posts.write().await.remove(id) {
            Some(_) => DeleteOutcome::Deleted,
            None => DeleteOutcome::ConditionFailed,
        })
    }
}
