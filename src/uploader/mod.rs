use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

pub mod memory;
pub mod s3;

pub use memory::InMemoryBlobStore;
pub use s3::S3BlobStore;

pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("image is not valid base64: {0}")]
    InvalidImage(#[from] base64::DecodeError),

    #[error("failed to upload object: {0}")]
    Upload(String),

    #[error("failed to delete object: {0}")]
    Delete(String),

    #[error("failed to fetch object: {0}")]
    Fetch(String),

    #[error("object not found: {0}")]
    NotFound(String),
}

/// Object storage holding post images
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` at `key`; `public_read` makes it readable by anyone
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        public_read: bool,
    ) -> Result<(), BlobError>;

    async fn delete_object(&self, key: &str) -> Result<(), BlobError>;

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, BlobError>;

    /// URL under which a public-read object at `key` can be fetched
    fn public_url(&self, key: &str) -> String;
}

/// Storage key of the image attached to post `post_id`
pub fn image_key(post_id: &str) -> String {
    format!("posts/{}.jpg", post_id)
}

/// Decode an image sent either as a data URL or as bare base64
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, BlobError> {
    // With a data URL prefix, the payload is the segment after the first comma
    let payload = if encoded.contains(',') {
        encoded.split(',').nth(1).unwrap_or_default()
    } else {
        encoded
    };

    // Line-wrapped base64 is common; the alphabet has no whitespace in it
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    Ok(STANDARD.decode(compact)?)
}

/// Recover the storage key from a public image URL: its path without the
/// leading separator.
pub fn key_from_url(image_url: &str) -> String {
    match reqwest::Url::parse(image_url) {
        Ok(url) => url.path().trim_start_matches('/').to_string(),
        // Not an absolute URL; treat the whole value as a path
        Err(_) => image_url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_start_matches('/')
            .to_string(),
    }
}
