pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    // Value objects
    BucketName,
    // Models
    BucketStatus,
    // Errors
    ConfigError,
    ObjectInfo,
    ObjectKey,
    ObjectPayload,
    ReplicationError,
    ReplicationOutcome,
    ReplicationReport,
    ReplicationRequest,
    StorageError,
    StoreConfig,
    StoreRole,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{ConfigProvider, ObjectStore, ReplicationService};

// Service implementations - business logic
pub use services::ReplicationServiceImpl;

// Application factory and configuration
pub use app::{
    AppBuilder, AppConfig, AppDependencies, AppError, AppServices, StorageBackend, StoreHandle,
    create_app_from_env, create_in_memory_app, create_s3_app,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    config::{EnvConfigProvider, StaticConfigProvider},
    storage::{ApacheObjectStoreAdapter, S3ObjectStoreAdapter},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        ApacheObjectStoreAdapter, AppBuilder, AppServices, BucketName, EnvConfigProvider,
        ObjectKey, ObjectPayload, ObjectStore, ReplicationOutcome, ReplicationRequest,
        ReplicationService, ReplicationServiceImpl, S3ObjectStoreAdapter, create_app_from_env,
        create_in_memory_app, create_s3_app,
    };
}
