use crate::domain::{
    errors::ConfigError,
    models::{StoreConfig, StoreRole},
};

/// Port for resolving store connection parameters.
///
/// Keeps secret storage swappable without touching the service logic.
pub trait ConfigProvider: Send + Sync {
    fn store_config(&self, role: StoreRole) -> Result<StoreConfig, ConfigError>;
}
