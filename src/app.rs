use std::sync::Arc;
use tracing::info;

use crate::{
    adapters::outbound::{
        config::{DEFAULT_SOURCE_BUCKET, DEFAULT_TARGET_BUCKET, EnvConfigProvider},
        storage::{ApacheObjectStoreAdapter, S3ObjectStoreAdapter},
    },
    domain::{
        errors::ConfigError,
        models::{StoreConfig, StoreRole},
        value_objects::BucketName,
    },
    ports::{config::ConfigProvider, storage::ObjectStore},
    services::ReplicationServiceImpl,
};

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Both stores live in process memory; for local runs and tests
    InMemory {
        source_bucket: BucketName,
        target_bucket: BucketName,
    },
    /// Two S3-compatible stores
    S3 {
        source: StoreConfig,
        target: StoreConfig,
    },
}

impl StorageBackend {
    /// In-memory stores using the default bucket names
    pub fn in_memory() -> Result<Self, AppError> {
        Ok(StorageBackend::InMemory {
            source_bucket: BucketName::new(DEFAULT_SOURCE_BUCKET).map_err(ConfigError::from)?,
            target_bucket: BucketName::new(DEFAULT_TARGET_BUCKET).map_err(ConfigError::from)?,
        })
    }

    /// Resolve both store configurations through a provider
    pub fn s3_from_provider(provider: &dyn ConfigProvider) -> Result<Self, AppError> {
        Ok(StorageBackend::S3 {
            source: provider.store_config(StoreRole::Source)?,
            target: provider.store_config(StoreRole::Target)?,
        })
    }
}

/// One configured store together with the bucket it is used with
#[derive(Clone)]
pub struct StoreHandle {
    pub role: StoreRole,
    pub store: Arc<dyn ObjectStore>,
    pub bucket: BucketName,
}

/// Application dependencies container
pub struct AppDependencies {
    pub source: StoreHandle,
    pub target: StoreHandle,
}

/// Application services container
pub struct AppServices {
    pub replication_service: ReplicationServiceImpl,
    pub source: StoreHandle,
    pub target: StoreHandle,
}

impl AppServices {
    pub fn store(&self, role: StoreRole) -> &StoreHandle {
        match role {
            StoreRole::Source => &self.source,
            StoreRole::Target => &self.target,
        }
    }
}

/// Application builder for dependency injection
#[derive(Default)]
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config = Some(AppConfig {
            storage_backend: backend,
        });
        self
    }

    /// Build the application dependencies
    ///
    /// Without an explicit configuration both stores are in memory.
    pub async fn build_dependencies(self) -> Result<AppDependencies, AppError> {
        let backend = match self.config {
            Some(config) => config.storage_backend,
            None => StorageBackend::in_memory()?,
        };

        match backend {
            StorageBackend::InMemory {
                source_bucket,
                target_bucket,
            } => {
                let source = Arc::new(ApacheObjectStoreAdapter::in_memory());
                let target = Arc::new(ApacheObjectStoreAdapter::in_memory());

                // The source side has nobody else to create its bucket
                source
                    .ensure_bucket(&source_bucket)
                    .await
                    .map_err(|e| AppError::StorageInit {
                        message: e.to_string(),
                    })?;

                info!(
                    source_bucket = %source_bucket,
                    target_bucket = %target_bucket,
                    "using in-memory stores"
                );

                Ok(AppDependencies {
                    source: StoreHandle {
                        role: StoreRole::Source,
                        store: source,
                        bucket: source_bucket,
                    },
                    target: StoreHandle {
                        role: StoreRole::Target,
                        store: target,
                        bucket: target_bucket,
                    },
                })
            }
            StorageBackend::S3 { source, target } => {
                info!(
                    source_endpoint = source.endpoint().unwrap_or("aws"),
                    source_bucket = %source.bucket(),
                    target_endpoint = target.endpoint().unwrap_or("aws"),
                    target_bucket = %target.bucket(),
                    "using S3-compatible stores"
                );

                Ok(AppDependencies {
                    source: Self::s3_handle(StoreRole::Source, &source),
                    target: Self::s3_handle(StoreRole::Target, &target),
                })
            }
        }
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;

        let replication_service = ReplicationServiceImpl::new(
            deps.source.store.clone(),
            deps.source.bucket.clone(),
            deps.target.store.clone(),
            deps.target.bucket.clone(),
        );

        Ok(AppServices {
            replication_service,
            source: deps.source,
            target: deps.target,
        })
    }

    fn s3_handle(role: StoreRole, config: &StoreConfig) -> StoreHandle {
        StoreHandle {
            role,
            store: Arc::new(S3ObjectStoreAdapter::from_config(config)),
            bucket: config.bucket().clone(),
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },
}

/// Convenience functions for common configurations
///
/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::in_memory()?)
        .build()
        .await
}

/// Create an application replicating between two S3-compatible stores
pub async fn create_s3_app(
    source: StoreConfig,
    target: StoreConfig,
) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::S3 { source, target })
        .build()
        .await
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    let backend = StorageBackend::s3_from_provider(&EnvConfigProvider::new())?;

    AppBuilder::new()
        .with_storage_backend(backend)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::outbound::config::StaticConfigProvider, ports::ReplicationService};

    #[tokio::test]
    async fn test_create_in_memory_app() {
        let app = create_in_memory_app().await.unwrap();

        assert_eq!(app.source.bucket.as_str(), DEFAULT_SOURCE_BUCKET);
        assert_eq!(app.target.bucket.as_str(), DEFAULT_TARGET_BUCKET);
        assert!(app.source.store.bucket_exists(&app.source.bucket).await.unwrap());

        // Target bucket only appears once replication needs it
        assert!(!app.target.store.bucket_exists(&app.target.bucket).await.unwrap());
        app.replication_service.ensure_target_bucket().await.unwrap();
        assert!(app.target.store.bucket_exists(&app.target.bucket).await.unwrap());
    }

    #[tokio::test]
    async fn test_store_lookup_by_role() {
        let app = create_in_memory_app().await.unwrap();

        assert_eq!(app.store(StoreRole::Source).role, StoreRole::Source);
        assert_eq!(app.store(StoreRole::Target).role, StoreRole::Target);
    }

    #[test]
    fn test_s3_backend_from_provider() {
        let config = |bucket: &str| {
            StoreConfig::builder()
                .endpoint("http://localhost:9000")
                .access_key("minioadmin")
                .secret_key("minioadmin")
                .bucket(BucketName::new(bucket).unwrap())
                .build()
        };
        let provider = StaticConfigProvider::new(config("from-bucket"), config("to-bucket"));

        match StorageBackend::s3_from_provider(&provider).unwrap() {
            StorageBackend::S3 { source, target } => {
                assert_eq!(source.bucket().as_str(), "from-bucket");
                assert_eq!(target.bucket().as_str(), "to-bucket");
            }
            other => panic!("unexpected backend: {:?}", other),
        }
    }
}
