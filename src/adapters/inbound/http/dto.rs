use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::{ReplicationError, ValidationError},
    models::ReplicationOutcome,
};

/// Body of `POST /v1/replicate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicationRequestDto {
    pub s3_key: String,
}

/// DTO for success responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponseDto {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// DTO for error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponseDto {
    pub status: String,
}

impl SuccessResponseDto {
    pub fn new(message: impl Into<String>) -> Self {
        SuccessResponseDto {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Body for a successful outcome; failures go through `ErrorResponseDto`
    pub fn from_outcome(outcome: &ReplicationOutcome) -> Self {
        Self::new(outcome.message())
    }
}

// Error response helpers

impl ErrorResponseDto {
    pub fn from_replication_error(error: &ReplicationError) -> Self {
        let (kind, detail) = match error {
            ReplicationError::NotFoundInSource { .. } => ("NotFoundInSource", error.to_string()),
            ReplicationError::TargetProbe { .. } => {
                ("TargetProbeFailed", "Error checking target".to_string())
            }
            ReplicationError::Upload { source, .. } => {
                ("UploadFailed", format!("Upload failed: {}", source))
            }
            ReplicationError::Source { .. } => ("SourceUnavailable", error.to_string()),
            ReplicationError::Listing(_) | ReplicationError::Bucket(_) => {
                ("StorageError", error.to_string())
            }
        };

        ErrorResponseDto {
            error: kind.to_string(),
            detail,
            timestamp: Utc::now(),
        }
    }

    pub fn from_validation_error(error: &ValidationError) -> Self {
        Self::bad_request(&format!("Invalid object key: {}", error))
    }

    pub fn bad_request(detail: &str) -> Self {
        ErrorResponseDto {
            error: "BadRequest".to_string(),
            detail: detail.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Convert replication errors to HTTP status codes for API responses
impl From<&ReplicationError> for StatusCode {
    fn from(err: &ReplicationError) -> Self {
        match err {
            ReplicationError::NotFoundInSource { .. } => StatusCode::NOT_FOUND,
            ReplicationError::Source { .. }
            | ReplicationError::TargetProbe { .. }
            | ReplicationError::Upload { .. }
            | ReplicationError::Listing(_)
            | ReplicationError::Bucket(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
