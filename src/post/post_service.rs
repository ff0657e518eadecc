use std::sync::Arc;

use log::{info, warn};
use serde_json::Value;
use uuid::Uuid;

use crate::database::{DeleteOutcome, PostStore};
use crate::middleware::auth::Claims;
use crate::post::post_model::{CreatePostRequest, Post};
use crate::uploader::{self, BlobStore, IMAGE_CONTENT_TYPE};
use crate::utils::error::PostError;
use crate::utils::numbers::normalize_numbers;

pub struct PostService {
    store: Arc<dyn PostStore>,
    blobs: Arc<dyn BlobStore>,
    enforce_ownership: bool,
}

impl PostService {
    pub fn new(
        store: Arc<dyn PostStore>,
        blobs: Arc<dyn BlobStore>,
        enforce_ownership: bool,
    ) -> Self {
        PostService {
            store,
            blobs,
            enforce_ownership,
        }
    }

    pub fn enforce_ownership(&self) -> bool {
        self.enforce_ownership
    }

    /// Every post, with numbers rendered in their native shape
    pub async fn list_posts(&self) -> Result<Vec<Value>, PostError> {
        let posts = self.store.scan().await?;

        posts
            .iter()
            .map(|post| Ok::<_, PostError>(normalize_numbers(serde_json::to_value(post)?)))
            .collect()
    }

    /// Validate, upload the image if any, then persist. Returns the new post id.
    pub async fn create_post(
        &self,
        mut request: CreatePostRequest,
        claims: Claims,
    ) -> Result<String, PostError> {
        // Checked in this order; the first gap is the one reported
        let title = request.title.take().ok_or_else(|| missing("title"))?;
        let content = request.content.take().ok_or_else(|| missing("content"))?;
        let timestamp = request.timestamp.take().ok_or_else(|| missing("timestamp"))?;
        let image = request.image.take();
        let extra = request.take_extra();

        let id = Uuid::new_v4().to_string();

        let image = match image.filter(|img| !img.is_empty()) {
            Some(encoded) => self.upload_image(&id, &encoded).await?,
            None => String::new(),
        };

        let (user_id, user_email) = if self.enforce_ownership {
            (claims.sub, claims.email)
        } else {
            (None, None)
        };

        let post = Post {
            id,
            title,
            content,
            timestamp,
            image,
            user_id,
            user_email,
            extra,
        };

        self.store.put(&post).await?;
        info!("Saved post {}", post.id);

        Ok(post.id)
    }

    async fn upload_image(&self, post_id: &str, encoded: &str) -> Result<String, PostError> {
        let bytes = uploader::decode_image(encoded)?;
        let key = uploader::image_key(post_id);

        self.blobs
            .put_object(&key, bytes, IMAGE_CONTENT_TYPE, true)
            .await?;

        let url = self.blobs.public_url(&key);
        info!("Uploaded image to {}", url);
        Ok(url)
    }

    /// Remove a post and, best effort, its image
    pub async fn delete_post(&self, id: &str, claims: &Claims) -> Result<(), PostError> {
        let post = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| PostError::NotFound(format!("Post {} not found", id)))?;

        if self.enforce_ownership && !is_owner(&post, claims) {
            return Err(PostError::Forbidden("Not your post".to_string()));
        }

        if !post.image.is_empty() {
            let key = uploader::key_from_url(&post.image);
            match self.blobs.delete_object(&key).await {
                Ok(()) => info!("Deleted image {}", key),
                Err(e) => warn!("Error deleting image {} for post {}: {}", key, id, e),
            }
        }

        match self.store.delete_if_exists(id).await? {
            DeleteOutcome::Deleted => Ok(()),
            DeleteOutcome::ConditionFailed => Err(PostError::NotFound(format!(
                "Post with id {} does not exist",
                id
            ))),
        }
    }
}

fn missing(field: &str) -> PostError {
    PostError::Validation(format!("Missing field: {}", field))
}

/// Posts without a recorded owner belong to nobody
fn is_owner(post: &Post, claims: &Claims) -> bool {
    match (post.user_id.as_deref(), claims.sub.as_deref()) {
        (Some(owner), Some(caller)) => owner == caller,
        _ => false,
    }
}
