use std::sync::Arc;

use crate::{
    domain::{
        errors::ConfigError,
        models::{DEFAULT_REGION, StoreConfig, StoreRole},
        value_objects::BucketName,
    },
    ports::config::ConfigProvider,
};

pub const DEFAULT_SOURCE_PREFIX: &str = "MINIO";
pub const DEFAULT_TARGET_PREFIX: &str = "FILEBASE";
pub const DEFAULT_SOURCE_BUCKET: &str = "source-bucket";
pub const DEFAULT_TARGET_BUCKET: &str = "replicated-bucket";
pub const DEFAULT_TARGET_ENDPOINT: &str = "https://s3.filebase.com";

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads store configuration from `<PREFIX>_*` environment variables.
///
/// Recognised suffixes: `ENDPOINT`, `ACCESS_KEY`, `SECRET_KEY`, `BUCKET`,
/// `REGION`, `FORCE_PATH_STYLE`. Only the credentials are required.
#[derive(Clone)]
pub struct EnvConfigProvider {
    lookup: Lookup,
    source_prefix: String,
    target_prefix: String,
}

impl EnvConfigProvider {
    /// Provider backed by the process environment
    pub fn new() -> Self {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    /// Provider backed by an arbitrary variable lookup
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Arc::new(lookup),
            source_prefix: DEFAULT_SOURCE_PREFIX.to_string(),
            target_prefix: DEFAULT_TARGET_PREFIX.to_string(),
        }
    }

    pub fn with_prefixes(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_prefix = source.into();
        self.target_prefix = target.into();
        self
    }

    fn prefix(&self, role: StoreRole) -> &str {
        match role {
            StoreRole::Source => &self.source_prefix,
            StoreRole::Target => &self.target_prefix,
        }
    }

    fn variable(&self, role: StoreRole, suffix: &str) -> String {
        format!("{}_{}", self.prefix(role), suffix)
    }

    /// Blank values count as unset
    fn optional(&self, role: StoreRole, suffix: &str) -> Option<String> {
        (self.lookup)(&self.variable(role, suffix))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, role: StoreRole, suffix: &str) -> Result<String, ConfigError> {
        self.optional(role, suffix)
            .ok_or_else(|| ConfigError::MissingVariable {
                variable: self.variable(role, suffix),
            })
    }

    fn parse_bool(&self, role: StoreRole, suffix: &str) -> Result<Option<bool>, ConfigError> {
        match self.optional(role, suffix) {
            None => Ok(None),
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(Some(true)),
                "false" | "0" | "no" => Ok(Some(false)),
                _ => Err(ConfigError::InvalidValue {
                    variable: self.variable(role, suffix),
                    reason: format!("expected a boolean, got '{}'", value),
                }),
            },
        }
    }
}

impl Default for EnvConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn store_config(&self, role: StoreRole) -> Result<StoreConfig, ConfigError> {
        let endpoint = self.optional(role, "ENDPOINT").or_else(|| match role {
            StoreRole::Source => None,
            StoreRole::Target => Some(DEFAULT_TARGET_ENDPOINT.to_string()),
        });

        let bucket = self.optional(role, "BUCKET").unwrap_or_else(|| {
            match role {
                StoreRole::Source => DEFAULT_SOURCE_BUCKET,
                StoreRole::Target => DEFAULT_TARGET_BUCKET,
            }
            .to_string()
        });

        Ok(StoreConfig::builder()
            .maybe_endpoint(endpoint)
            .access_key(self.required(role, "ACCESS_KEY")?)
            .secret_key(self.required(role, "SECRET_KEY")?)
            .region(
                self.optional(role, "REGION")
                    .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            )
            .bucket(BucketName::new(bucket)?)
            .force_path_style(self.parse_bool(role, "FORCE_PATH_STYLE")?.unwrap_or(true))
            .build())
    }
}
