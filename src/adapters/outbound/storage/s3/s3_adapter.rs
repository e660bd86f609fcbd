use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    error::ProvideErrorMetadata,
    primitives::ByteStream,
    types::{BucketLocationConstraint, CreateBucketConfiguration},
};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

use super::create_s3_client;
use crate::{
    adapters::outbound::storage::error::{
        MissingResource, from_sdk_error, is_http_not_found, missing_resource,
    },
    domain::{
        errors::{StorageError, StorageResult},
        models::{DEFAULT_REGION, ObjectInfo, ObjectPayload, StoreConfig},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::ObjectStore,
};

/// S3 storage adapter that implements the ObjectStore trait
#[derive(Clone, Debug)]
pub struct S3ObjectStoreAdapter {
    client: Client,
    region: String,
}

impl S3ObjectStoreAdapter {
    /// Create a new S3 adapter around an existing client
    pub fn new(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(create_s3_client(config), config.region())
    }

    fn to_system_time(time: &aws_sdk_s3::primitives::DateTime) -> Option<SystemTime> {
        let secs = u64::try_from(time.secs()).ok()?;
        Some(SystemTime::UNIX_EPOCH + Duration::new(secs, time.subsec_nanos()))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStoreAdapter {
    async fn bucket_exists(&self, bucket: &BucketName) -> StorageResult<bool> {
        match self.client.head_bucket().bucket(bucket.as_str()).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let not_found = err
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_not_found())
                    || is_http_not_found(&err);

                if not_found {
                    Ok(false)
                } else {
                    Err(from_sdk_error(err, &format!("probe bucket '{}'", bucket)))
                }
            }
        }
    }

    async fn create_bucket(&self, bucket: &BucketName) -> StorageResult<()> {
        let mut request = self.client.create_bucket().bucket(bucket.as_str());

        // us-east-1 rejects an explicit location constraint
        if self.region != DEFAULT_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }

        match request.send().await {
            Ok(_) => Ok(()),
            Err(err) => {
                let (owned, taken) = err.as_service_error().map_or((false, false), |e| {
                    (e.is_bucket_already_owned_by_you(), e.is_bucket_already_exists())
                });

                if owned {
                    debug!(bucket = %bucket, "bucket already owned by these credentials");
                    Ok(())
                } else if taken {
                    Err(StorageError::BucketAlreadyExists {
                        bucket: bucket.clone(),
                    })
                } else {
                    Err(from_sdk_error(err, &format!("create bucket '{}'", bucket)))
                }
            }
        }
    }

    async fn delete_bucket(&self, bucket: &BucketName) -> StorageResult<()> {
        self.client
            .delete_bucket()
            .bucket(bucket.as_str())
            .send()
            .await
            .map_err(|err| {
                if is_http_not_found(&err) {
                    StorageError::BucketNotFound {
                        bucket: bucket.clone(),
                    }
                } else {
                    from_sdk_error(err, &format!("delete bucket '{}'", bucket))
                }
            })?;

        Ok(())
    }

    async fn list_buckets(&self) -> StorageResult<Vec<BucketName>> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|err| from_sdk_error(err, "list buckets"))?;

        let mut buckets = Vec::new();
        for name in output.buckets().iter().filter_map(|b| b.name()) {
            match BucketName::new(name) {
                Ok(bucket) => buckets.push(bucket),
                // Legacy buckets may predate the current naming rules
                Err(e) => warn!(bucket = name, error = %e, "skipping bucket with unsupported name"),
            }
        }

        Ok(buckets)
    }

    async fn list_keys(&self, bucket: &BucketName) -> StorageResult<Vec<ObjectInfo>> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket.as_str())
            .send()
            .await
            .map_err(|err| {
                let no_such_bucket = err
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_no_such_bucket());

                if no_such_bucket {
                    StorageError::BucketNotFound {
                        bucket: bucket.clone(),
                    }
                } else {
                    from_sdk_error(err, &format!("list objects in '{}'", bucket))
                }
            })?;

        if output.is_truncated().unwrap_or(false) {
            warn!(
                bucket = %bucket,
                returned = output.contents().len(),
                "listing truncated, only the first page of keys is used"
            );
        }

        output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(|key| (key, object)))
            .map(|(key, object)| {
                let key = ObjectKey::new(key).map_err(|e| StorageError::ValidationError {
                    message: format!("Invalid object key from store: {}", e),
                })?;

                Ok(ObjectInfo {
                    key,
                    size: object.size().map_or(0, |size| size.max(0) as u64),
                    last_modified: object.last_modified().and_then(Self::to_system_time),
                    etag: object.e_tag().map(str::to_string),
                })
            })
            .collect()
    }

    async fn get_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
    ) -> StorageResult<ObjectPayload> {
        let output = self
            .client
            .get_object()
            .bucket(bucket.as_str())
            .key(key.as_str())
            .send()
            .await
            .map_err(|err| {
                let missing = missing_resource(
                    err.as_service_error().and_then(|service_err| service_err.code()),
                    is_http_not_found(&err),
                );

                match missing {
                    Some(MissingResource::Bucket) => StorageError::BucketNotFound {
                        bucket: bucket.clone(),
                    },
                    Some(MissingResource::Object) => StorageError::ObjectNotFound {
                        bucket: bucket.clone(),
                        key: key.clone(),
                    },
                    None => from_sdk_error(err, &format!("get object '{}'", key)),
                }
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| {
                StorageError::infrastructure(format!("Failed to read body of '{}'", key), e)
            })?
            .into_bytes();

        Ok(ObjectPayload::new(bytes))
    }

    async fn head_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<bool> {
        match self
            .client
            .head_object()
            .bucket(bucket.as_str())
            .key(key.as_str())
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let not_found = err
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_not_found())
                    || is_http_not_found(&err);

                if not_found {
                    Ok(false)
                } else {
                    Err(from_sdk_error(err, &format!("check existence of '{}'", key)))
                }
            }
        }
    }

    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        payload: ObjectPayload,
    ) -> StorageResult<()> {
        let size = payload.size();

        self.client
            .put_object()
            .bucket(bucket.as_str())
            .key(key.as_str())
            .content_length(size as i64)
            .body(ByteStream::from(payload.into_bytes()))
            .send()
            .await
            .map_err(|err| from_sdk_error(err, &format!("put object '{}'", key)))?;

        Ok(())
    }

    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<()> {
        self.client
            .delete_object()
            .bucket(bucket.as_str())
            .key(key.as_str())
            .send()
            .await
            .map_err(|err| from_sdk_error(err, &format!("delete object '{}'", key)))?;

        Ok(())
    }
}
