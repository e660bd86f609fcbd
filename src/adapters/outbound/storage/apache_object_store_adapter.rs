use async_trait::async_trait;
use futures::TryStreamExt;
use object_store::{
    ObjectStore as ApacheObjectStore, PutPayload, memory::InMemory, path::Path as ObjectPath,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::from_object_store_error;
use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{BucketStatus, ObjectInfo, ObjectPayload},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::ObjectStore,
};

/// Creates the backend for a newly created bucket
pub type BucketFactory = Arc<dyn Fn(&BucketName) -> Arc<dyn ApacheObjectStore> + Send + Sync>;

/// Adapter that implements our ObjectStore trait on top of Apache object_store.
///
/// object_store addresses a single bucket per backend, so the adapter keeps
/// one backend per bucket name and creates new ones through a factory.
pub struct ApacheObjectStoreAdapter {
    buckets: RwLock<BTreeMap<BucketName, Arc<dyn ApacheObjectStore>>>,
    factory: BucketFactory,
}

impl ApacheObjectStoreAdapter {
    pub fn new(factory: BucketFactory) -> Self {
        Self {
            buckets: RwLock::new(BTreeMap::new()),
            factory,
        }
    }

    /// Adapter whose buckets each live in their own `InMemory` store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(in_memory_backend))
    }

    /// Mount an existing backend as `bucket`
    pub fn with_bucket(mut self, bucket: BucketName, store: Arc<dyn ApacheObjectStore>) -> Self {
        self.buckets.get_mut().insert(bucket, store);
        self
    }

    async fn backend(&self, bucket: &BucketName) -> StorageResult<Arc<dyn ApacheObjectStore>> {
        self.buckets
            .read()
            .await
            .get(bucket)
            .cloned()
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.clone(),
            })
    }

    async fn list_backend(
        backend: &dyn ApacheObjectStore,
        bucket: &BucketName,
    ) -> StorageResult<Vec<ObjectInfo>> {
        let metas: Vec<_> = backend
            .list(None)
            .try_collect()
            .await
            .map_err(|e| from_object_store_error(e, "list objects", bucket, None))?;

        metas
            .into_iter()
            .map(|meta| {
                let key = ObjectKey::new(meta.location.to_string()).map_err(|e| {
                    StorageError::ValidationError {
                        message: format!("Invalid object key from store: {}", e),
                    }
                })?;

                Ok(ObjectInfo {
                    key,
                    size: meta.size,
                    last_modified: Some(meta.last_modified.into()),
                    etag: meta.e_tag,
                })
            })
            .collect()
    }
}

fn in_memory_backend(_bucket: &BucketName) -> Arc<dyn ApacheObjectStore> {
    Arc::new(InMemory::new())
}

impl Default for ApacheObjectStoreAdapter {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    async fn bucket_exists(&self, bucket: &BucketName) -> StorageResult<bool> {
        Ok(self.buckets.read().await.contains_key(bucket))
    }

    async fn create_bucket(&self, bucket: &BucketName) -> StorageResult<()> {
        let mut buckets = self.buckets.write().await;
        if buckets.contains_key(bucket) {
            return Err(StorageError::BucketAlreadyExists {
                bucket: bucket.clone(),
            });
        }

        buckets.insert(bucket.clone(), (self.factory)(bucket));
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &BucketName) -> StorageResult<()> {
        let mut buckets = self.buckets.write().await;
        let backend = buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.clone(),
            })?;

        // Same contract as S3: only empty buckets can be removed
        if !Self::list_backend(backend.as_ref(), bucket).await?.is_empty() {
            return Err(StorageError::InfrastructureError {
                message: format!("Failed to delete bucket '{}'", bucket),
                source: Some("BucketNotEmpty".to_string()),
            });
        }

        buckets.remove(bucket);
        Ok(())
    }

    /// Probe and create under one write lock, so concurrent first callers
    /// see exactly one `Created`
    async fn ensure_bucket(&self, bucket: &BucketName) -> StorageResult<BucketStatus> {
        let mut buckets = self.buckets.write().await;
        if buckets.contains_key(bucket) {
            return Ok(BucketStatus::Existing);
        }

        buckets.insert(bucket.clone(), (self.factory)(bucket));
        Ok(BucketStatus::Created)
    }

    async fn list_buckets(&self) -> StorageResult<Vec<BucketName>> {
        Ok(self.buckets.read().await.keys().cloned().collect())
    }

    async fn list_keys(&self, bucket: &BucketName) -> StorageResult<Vec<ObjectInfo>> {
        let backend = self.backend(bucket).await?;
        Self::list_backend(backend.as_ref(), bucket).await
    }

    async fn get_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
    ) -> StorageResult<ObjectPayload> {
        let backend = self.backend(bucket).await?;
        let path = ObjectPath::from(key.as_str());

        let result = backend
            .get(&path)
            .await
            .map_err(|e| from_object_store_error(e, "get object", bucket, Some(key)))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| from_object_store_error(e, "read object bytes", bucket, Some(key)))?;

        Ok(ObjectPayload::new(bytes))
    }

    async fn head_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<bool> {
        let backend = self.backend(bucket).await?;
        let path = ObjectPath::from(key.as_str());

        match backend.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(from_object_store_error(
                e,
                "check object existence",
                bucket,
                Some(key),
            )),
        }
    }

    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        payload: ObjectPayload,
    ) -> StorageResult<()> {
        let backend = self.backend(bucket).await?;
        let path = ObjectPath::from(key.as_str());

        backend
            .put(&path, PutPayload::from(payload.into_bytes()))
            .await
            .map_err(|e| from_object_store_error(e, "put object", bucket, Some(key)))?;

        Ok(())
    }

    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<()> {
        let backend = self.backend(bucket).await?;
        let path = ObjectPath::from(key.as_str());

        match backend.delete(&path).await {
            // Deleting a missing key is a no-op on S3
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(from_object_store_error(e, "delete object", bucket, Some(key))),
        }
    }
}
