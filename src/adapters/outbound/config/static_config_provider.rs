use crate::{
    domain::{
        errors::ConfigError,
        models::{StoreConfig, StoreRole},
    },
    ports::config::ConfigProvider,
};

/// Provider holding fixed configurations, e.g. from a secret manager or tests
#[derive(Debug, Clone)]
pub struct StaticConfigProvider {
    source: StoreConfig,
    target: StoreConfig,
}

impl StaticConfigProvider {
    pub fn new(source: StoreConfig, target: StoreConfig) -> Self {
        Self { source, target }
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn store_config(&self, role: StoreRole) -> Result<StoreConfig, ConfigError> {
        Ok(match role {
            StoreRole::Source => self.source.clone(),
            StoreRole::Target => self.target.clone(),
        })
    }
}
