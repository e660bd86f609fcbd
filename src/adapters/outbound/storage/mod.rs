// Infrastructure error conversions
pub(crate) mod error;

// Storage implementations
pub mod apache_object_store_adapter;

// Provider-specific implementations
pub mod s3;

// Re-export key types
pub use apache_object_store_adapter::{ApacheObjectStoreAdapter, BucketFactory};
pub use s3::{S3ObjectStoreAdapter, create_s3_client};
