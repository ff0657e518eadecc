use async_trait::async_trait;
use thiserror::Error;

use crate::post::post_model::Post;

pub mod db;
pub mod memory;

pub use db::MongoPostStore;
pub use memory::InMemoryPostStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post store request failed: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("post store request failed: {0}")]
    Backend(String),
}

/// Result of a delete guarded by "the record must still exist"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    ConditionFailed,
}

/// Key-value table of posts keyed by post id
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Every stored post, in no particular order
    async fn scan(&self) -> Result<Vec<Post>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError>;

    /// Unconditional write; replaces any record with the same id
    async fn put(&self, post: &Post) -> Result<(), StoreError>;

    async fn delete_if_exists(&self, id: &str) -> Result<DeleteOutcome, StoreError>;
}
