use crate::domain::value_objects::{BucketName, ObjectKey};

/// Errors that can occur during storage operations
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Object not found in the addressed bucket
    ObjectNotFound { bucket: BucketName, key: ObjectKey },

    /// Bucket not found
    BucketNotFound { bucket: BucketName },

    /// Bucket creation raced with another creator or is owned elsewhere
    BucketAlreadyExists { bucket: BucketName },

    /// Validation error
    ValidationError { message: String },

    /// Infrastructure error with external source (network, auth, store failure)
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl StorageError {
    pub fn infrastructure(message: impl Into<String>, source: impl ToString) -> Self {
        StorageError::InfrastructureError {
            message: message.into(),
            source: Some(source.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::ObjectNotFound { .. } | StorageError::BucketNotFound { .. }
        )
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ObjectNotFound { bucket, key } => {
                write!(f, "Object not found: {}/{}", bucket, key)
            }
            StorageError::BucketNotFound { bucket } => {
                write!(f, "Bucket not found: {}", bucket)
            }
            StorageError::BucketAlreadyExists { bucket } => {
                write!(f, "Bucket already exists: {}", bucket)
            }
            StorageError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
            StorageError::InfrastructureError { message, source } => match source {
                Some(source) => write!(f, "Infrastructure error: {} ({})", message, source),
                None => write!(f, "Infrastructure error: {}", message),
            },
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
