use thiserror::Error;

use crate::domain::errors::ValidationError;

/// Errors raised while resolving store configuration
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("{variable} environment variable required")]
    MissingVariable { variable: String },

    #[error("Invalid value for {variable}: {reason}")]
    InvalidValue { variable: String, reason: String },

    #[error("Invalid bucket name: {0}")]
    InvalidBucket(#[from] ValidationError),
}
