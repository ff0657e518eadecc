use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use log::info;

use super::{BlobError, BlobStore};

/// S3 bucket holding post images
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    region: String,
}

impl S3BlobStore {
    /// Build a client for `region` using credentials from the environment
    pub async fn new(region: &str, bucket: &str) -> Self {
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self::with_client(Client::new(&shared_config), region, bucket)
    }

    pub fn with_client(client: Client, region: &str, bucket: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        public_read: bool,
    ) -> Result<(), BlobError> {
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes));

        if public_read {
            request = request.acl(ObjectCannedAcl::PublicRead);
        }

        request
            .send()
            .await
            .map_err(|e| BlobError::Upload(DisplayErrorContext(e).to_string()))?;

        info!("Uploaded s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), BlobError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| BlobError::Delete(DisplayErrorContext(e).to_string()))?;

        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    BlobError::NotFound(key.to_string())
                } else {
                    BlobError::Fetch(DisplayErrorContext(e).to_string())
                }
            })?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| BlobError::Fetch(e.to_string()))?;

        Ok(body.into_bytes().to_vec())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}
