//! S3 attachment store implementation.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use uuid::Uuid;

use todos_core::storage::{AttachmentStore, Result};

use super::error::{
    map_head_object_error, map_presign_get_error, map_presign_put_error,
    map_presigning_config_error,
};

const ENTITY_TYPE: &str = "Attachment";

/// S3-based attachment store.
///
/// Each item has at most one attachment, stored under the item's `todoId`.
#[derive(Debug, Clone)]
pub struct S3AttachmentStore {
    client: Client,
    bucket: String,
    url_expiration: Duration,
}

impl S3AttachmentStore {
    /// Creates a new store for `bucket` issuing URLs valid for `url_expiration`.
    pub fn new(client: Client, bucket: impl Into<String>, url_expiration: Duration) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            url_expiration,
        }
    }

    /// Get the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn presigning_config(&self) -> Result<PresigningConfig> {
        PresigningConfig::expires_in(self.url_expiration).map_err(map_presigning_config_error)
    }
}

#[async_trait]
impl AttachmentStore for S3AttachmentStore {
    async fn upload_url(&self, todo_id: Uuid) -> Result<String> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(todo_id.to_string())
            .presigned(self.presigning_config()?)
            .await
            .map_err(map_presign_put_error)?;

        Ok(request.uri().to_string())
    }

    async fn download_url(&self, todo_id: Uuid) -> Result<String> {
        let key = todo_id.to_string();

        self.client
            .head_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| map_head_object_error(e, ENTITY_TYPE, key.clone()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .presigned(self.presigning_config()?)
            .await
            .map_err(map_presign_get_error)?;

        Ok(request.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{store_answering, BUCKET};
    use super::*;
    use todos_core::storage::RepositoryError;

    #[tokio::test]
    async fn test_upload_url_is_presigned_for_todo_key() {
        let store = store_answering(200);
        let todo_id = Uuid::new_v4();

        let url = store.upload_url(todo_id).await.unwrap();

        assert!(url.contains(BUCKET));
        assert!(url.contains(&todo_id.to_string()));
        assert!(url.contains("X-Amz-Expires=300"));
    }

    #[tokio::test]
    async fn test_download_url_when_object_exists() {
        let store = store_answering(200);
        let todo_id = Uuid::new_v4();

        let url = store.download_url(todo_id).await.unwrap();

        assert!(url.contains(&todo_id.to_string()));
        assert!(url.contains("X-Amz-Signature="));
    }

    #[tokio::test]
    async fn test_download_url_missing_object_is_not_found() {
        for status in [403, 404] {
            let store = store_answering(status);

            let result = store.download_url(Uuid::new_v4()).await;

            assert!(
                matches!(result, Err(RepositoryError::NotFound { .. })),
                "status {status}: {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_download_url_server_error_is_query_failed() {
        let store = store_answering(500);

        let result = store.download_url(Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepositoryError::QueryFailed(_))));
    }
}
