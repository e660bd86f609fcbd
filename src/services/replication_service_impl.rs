use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::{ReplicationError, StorageError},
        models::{
            BucketStatus, ObjectPayload, ReplicationOutcome, ReplicationReport, ReplicationRequest,
        },
        value_objects::{BucketName, ObjectKey},
    },
    ports::{services::ReplicationService, storage::ObjectStore},
};

/// Implementation of ReplicationService copying between two ObjectStore ports
#[derive(Clone)]
pub struct ReplicationServiceImpl {
    source: Arc<dyn ObjectStore>,
    source_bucket: BucketName,
    target: Arc<dyn ObjectStore>,
    target_bucket: BucketName,
}

impl ReplicationServiceImpl {
    /// Create a new ReplicationServiceImpl instance
    pub fn new(
        source: Arc<dyn ObjectStore>,
        source_bucket: BucketName,
        target: Arc<dyn ObjectStore>,
        target_bucket: BucketName,
    ) -> Self {
        Self {
            source,
            source_bucket,
            target,
            target_bucket,
        }
    }

    pub fn source_bucket(&self) -> &BucketName {
        &self.source_bucket
    }

    pub fn target_bucket(&self) -> &BucketName {
        &self.target_bucket
    }

    /// Upload an already-known-missing key: fetch from source, then put to target
    async fn copy(&self, key: &ObjectKey) -> Result<ReplicationOutcome, ReplicationError> {
        let payload = self.fetch(key).await?;
        self.upload(key, payload).await
    }

    async fn upload(
        &self,
        key: &ObjectKey,
        payload: ObjectPayload,
    ) -> Result<ReplicationOutcome, ReplicationError> {
        let size = payload.size();

        debug!(key = %key, size, "uploading to target");
        self.target
            .put_object(&self.target_bucket, key, payload)
            .await
            .map_err(|source| ReplicationError::Upload {
                key: key.clone(),
                source,
            })?;

        info!(key = %key, size, "replicated");
        Ok(ReplicationOutcome::Replicated {
            key: key.clone(),
            size,
        })
    }

    async fn fetch(&self, key: &ObjectKey) -> Result<ObjectPayload, ReplicationError> {
        debug!(key = %key, bucket = %self.source_bucket, "fetching from source");
        self.source
            .get_object(&self.source_bucket, key)
            .await
            .map_err(|e| match e {
                StorageError::ObjectNotFound { .. } => {
                    ReplicationError::NotFoundInSource { key: key.clone() }
                }
                source => ReplicationError::Source {
                    key: key.clone(),
                    source,
                },
            })
    }
}

#[async_trait]
impl ReplicationService for ReplicationServiceImpl {
    async fn replicate(
        &self,
        request: ReplicationRequest,
    ) -> Result<ReplicationOutcome, ReplicationError> {
        let key = request.key;

        // Source is read first so a missing object is reported as such even
        // when the target already holds the key.
        let payload = self.fetch(&key).await?;
        self.ensure_target_bucket().await?;

        let exists = self
            .target
            .head_object(&self.target_bucket, &key)
            .await
            .map_err(|source| ReplicationError::TargetProbe {
                key: key.clone(),
                source,
            })?;

        if exists {
            info!(key = %key, "already exists in target, skipping upload");
            return Ok(ReplicationOutcome::AlreadyExists { key });
        }

        self.upload(&key, payload).await
    }

    async fn replicate_all(&self) -> Result<ReplicationReport, ReplicationError> {
        self.ensure_target_bucket().await?;

        let source_objects = self
            .source
            .list_keys(&self.source_bucket)
            .await
            .map_err(ReplicationError::Listing)?;
        info!(
            count = source_objects.len(),
            bucket = %self.source_bucket,
            "listed source objects"
        );

        // Built once: keys uploaded to the target by someone else during the
        // run are not seen and get overwritten with the same content.
        let existing: HashSet<ObjectKey> = self
            .target
            .list_keys(&self.target_bucket)
            .await
            .map_err(ReplicationError::Listing)?
            .into_iter()
            .map(|info| info.key)
            .collect();

        let mut report = ReplicationReport::new(source_objects.len());

        for object in source_objects {
            let key = object.key;

            if existing.contains(&key) {
                info!(key = %key, "skipping, already exists in target");
                report.record(ReplicationOutcome::AlreadyExists { key });
                continue;
            }

            match self.copy(&key).await {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    warn!(key = %key, error = %e, "replication failed");
                    report.record(e.outcome(&key));
                }
            }
        }

        info!(
            replicated = report.replicated(),
            skipped = report.skipped(),
            not_found = report.not_found(),
            failed = report.failed(),
            "replication run completed"
        );

        Ok(report)
    }

    async fn ensure_target_bucket(&self) -> Result<BucketStatus, ReplicationError> {
        let status = self
            .target
            .ensure_bucket(&self.target_bucket)
            .await
            .map_err(ReplicationError::Bucket)?;

        match status {
            BucketStatus::Created => info!(bucket = %self.target_bucket, "target bucket created"),
            BucketStatus::Existing => {
                debug!(bucket = %self.target_bucket, "target bucket already exists")
            }
        }

        Ok(status)
    }
}
