use crate::domain::{
    errors::ReplicationError,
    models::{BucketStatus, ReplicationOutcome, ReplicationReport, ReplicationRequest},
};
use async_trait::async_trait;

/// Port for moving objects from a source store to a target store
#[async_trait]
pub trait ReplicationService: Send + Sync + 'static {
    /// Copy one object unless the target already holds its key.
    ///
    /// Returns `Replicated` or `AlreadyExists`; every other outcome is an error.
    async fn replicate(
        &self,
        request: ReplicationRequest,
    ) -> Result<ReplicationOutcome, ReplicationError>;

    /// Copy every source object whose key is missing from the target, sequentially
    async fn replicate_all(&self) -> Result<ReplicationReport, ReplicationError>;

    /// Create the target bucket if it does not exist yet
    async fn ensure_target_bucket(&self) -> Result<BucketStatus, ReplicationError>;
}
