use bon::Builder;

use crate::domain::value_objects::BucketName;

pub const DEFAULT_REGION: &str = "us-east-1";

/// Which side of a replication a store sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreRole {
    Source,
    Target,
}

impl StoreRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreRole::Source => "source",
            StoreRole::Target => "target",
        }
    }
}

impl std::fmt::Display for StoreRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection parameters for one S3-compatible store.
///
/// Fields are private: a config is built once and then only read.
#[derive(Clone, Builder)]
pub struct StoreConfig {
    /// Custom endpoint (MinIO, Filebase, ...); `None` means AWS S3
    #[builder(into)]
    endpoint: Option<String>,
    #[builder(into)]
    access_key: String,
    #[builder(into)]
    secret_key: String,
    #[builder(into, default = DEFAULT_REGION.to_string())]
    region: String,
    bucket: BucketName,
    #[builder(default = true)]
    force_path_style: bool,
}

impl StoreConfig {
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    pub fn force_path_style(&self) -> bool {
        self.force_path_style
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}
