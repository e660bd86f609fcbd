pub mod config;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use config::ConfigProvider;
pub use services::ReplicationService;
pub use storage::ObjectStore;
