//! Application configuration

mod app_config;

pub use app_config::{
    parse_cors_origins, AppConfig, AuthConfig, CorsConfig, LogFormat, LoggingConfig,
    MetricsConfig, ProviderConfig, ProvidersConfig, ServerConfig, VectorStoreConfig,
};
