use crate::domain::{
    errors::StorageResult,
    models::{BucketStatus, ObjectInfo, ObjectPayload},
    value_objects::{BucketName, ObjectKey},
};
use async_trait::async_trait;

/// Port for object storage operations
/// This abstracts the actual storage backend (S3, MinIO, Filebase, in-memory)
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Check if a bucket exists using a metadata probe
    async fn bucket_exists(&self, bucket: &BucketName) -> StorageResult<bool>;

    /// Create a bucket
    async fn create_bucket(&self, bucket: &BucketName) -> StorageResult<()>;

    /// Delete an (empty) bucket. Irreversible.
    async fn delete_bucket(&self, bucket: &BucketName) -> StorageResult<()>;

    /// List all buckets visible with the configured credentials
    async fn list_buckets(&self) -> StorageResult<Vec<BucketName>>;

    /// List the objects in a bucket.
    ///
    /// Issues a single listing call. Stores cap a listing page (1000 keys on
    /// S3), so larger buckets are truncated.
    async fn list_keys(&self, bucket: &BucketName) -> StorageResult<Vec<ObjectInfo>>;

    /// Retrieve the whole object, buffered in memory
    async fn get_object(&self, bucket: &BucketName, key: &ObjectKey)
    -> StorageResult<ObjectPayload>;

    /// Check if object exists without transferring its payload
    async fn head_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<bool>;

    /// Store object data, overwriting whatever is there
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        payload: ObjectPayload,
    ) -> StorageResult<()>;

    /// Delete object data. Irreversible.
    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<()>;

    /// Probe the bucket and create it if the probe reports it missing.
    ///
    /// Probe failures other than "not found" are returned as-is.
    async fn ensure_bucket(&self, bucket: &BucketName) -> StorageResult<BucketStatus> {
        if self.bucket_exists(bucket).await? {
            return Ok(BucketStatus::Existing);
        }

        self.create_bucket(bucket).await?;
        Ok(BucketStatus::Created)
    }
}
