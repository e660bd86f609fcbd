mod env_config_provider;
mod static_config_provider;

pub use env_config_provider::{
    DEFAULT_SOURCE_BUCKET, DEFAULT_SOURCE_PREFIX, DEFAULT_TARGET_BUCKET, DEFAULT_TARGET_ENDPOINT,
    DEFAULT_TARGET_PREFIX, EnvConfigProvider,
};
pub use static_config_provider::StaticConfigProvider;
