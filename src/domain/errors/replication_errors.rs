use thiserror::Error;

use crate::domain::{
    errors::StorageError,
    models::ReplicationOutcome,
    value_objects::ObjectKey,
};

/// Errors that stop a replication call before it reaches a successful outcome
#[derive(Debug, Clone, Error)]
pub enum ReplicationError {
    #[error("Object '{key}' not found in source")]
    NotFoundInSource { key: ObjectKey },

    #[error("Failed to fetch '{key}' from source: {source}")]
    Source { key: ObjectKey, source: StorageError },

    #[error("Error checking target for '{key}': {source}")]
    TargetProbe { key: ObjectKey, source: StorageError },

    #[error("Upload of '{key}' failed: {source}")]
    Upload { key: ObjectKey, source: StorageError },

    #[error("Failed to list objects: {0}")]
    Listing(StorageError),

    #[error("Target bucket unavailable: {0}")]
    Bucket(StorageError),
}

impl ReplicationError {
    /// The key this error belongs to, if it was raised for a single object
    pub fn key(&self) -> Option<&ObjectKey> {
        match self {
            ReplicationError::NotFoundInSource { key }
            | ReplicationError::Source { key, .. }
            | ReplicationError::TargetProbe { key, .. }
            | ReplicationError::Upload { key, .. } => Some(key),
            ReplicationError::Listing(_) | ReplicationError::Bucket(_) => None,
        }
    }

    /// Fold the error into the tagged outcome reported for a key.
    pub fn outcome(&self, key: &ObjectKey) -> ReplicationOutcome {
        match self {
            ReplicationError::NotFoundInSource { key } => {
                ReplicationOutcome::NotFoundInSource { key: key.clone() }
            }
            other => ReplicationOutcome::Failed {
                key: key.clone(),
                reason: other.to_string(),
            },
        }
    }
}
