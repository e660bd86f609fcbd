//! S3-compatible storage adapter built on the AWS SDK.
//!
//! Works against AWS S3 as well as MinIO, Filebase and other stores that
//! speak the S3 API; path-style addressing is on by default for the latter.

pub mod s3_adapter;

pub use s3_adapter::S3ObjectStoreAdapter;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};

use crate::domain::models::StoreConfig;

/// Create an S3 client from a store configuration
pub fn create_s3_client(config: &StoreConfig) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        config.access_key(),
        config.secret_key(),
        None, // session token
        None, // expiration
        "object-replicator-static",
    );

    let mut builder = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(config.region().to_string()))
        .credentials_provider(credentials)
        .force_path_style(config.force_path_style());

    if let Some(endpoint) = config.endpoint() {
        builder = builder.endpoint_url(endpoint);
    }

    aws_sdk_s3::Client::from_conf(builder.build())
}
