//! LLM Vector Gateway
//!
//! An authenticated HTTP gateway in front of:
//! - text generation (OpenAI, Anthropic)
//! - embeddings (OpenAI)
//! - document ingestion and semantic search over a vector store (Qdrant or in-process)

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use api::state::AppState;
use domain::{AuthProvider, VectorStore};
use infrastructure::{
    auth::{JwtAuthProvider, SupabaseAuthProvider},
    http_client::HttpClient,
    registry::{HttpProviderFactory, ProviderRegistry},
    vector_store::{InMemoryVectorStore, QdrantVectorStore},
};
use tracing::{info, warn};

/// Create the application state from configuration.
///
/// Fails when the authentication backend is not configured; every data
/// endpoint requires a verified caller.
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let client = HttpClient::with_timeout(Duration::from_secs(config.providers.request_timeout_secs))
        .context("failed to build HTTP client")?;

    let registry = Arc::new(ProviderRegistry::new(
        config.providers.clone(),
        Arc::new(HttpProviderFactory::new(client.clone())),
    ));
    log_configured_providers(&registry);

    let vector_store = create_vector_store(config, &client);
    let auth_provider = create_auth_provider(config, &client)?;

    Ok(AppState::new(
        registry,
        vector_store,
        auth_provider,
        config.vector_store.ingest_concurrency,
        config.environment.clone(),
    ))
}

fn log_configured_providers(registry: &ProviderRegistry) {
    let completion = registry.configured_completion_providers();
    let embedding = registry.configured_embedding_providers();

    if completion.is_empty() {
        warn!("No completion provider has an API key; generation requests will fail");
    }
    info!(?completion, ?embedding, "Model providers configured");
}

fn create_vector_store(config: &AppConfig, client: &HttpClient) -> Arc<dyn VectorStore> {
    let settings = &config.vector_store;

    match settings.url() {
        Some(url) => {
            info!(url, collection = %settings.collection, "Using Qdrant vector store");
            let store = QdrantVectorStore::new(client.clone(), url, settings.collection.clone());
            match settings.api_key() {
                Some(key) => Arc::new(store.with_api_key(key)),
                None => Arc::new(store),
            }
        }
        None => {
            warn!(collection = %settings.collection, "No vector store URL configured; documents are kept in memory");
            Arc::new(InMemoryVectorStore::new(settings.collection.clone()))
        }
    }
}

fn create_auth_provider(
    config: &AppConfig,
    client: &HttpClient,
) -> anyhow::Result<Arc<dyn AuthProvider>> {
    let auth = &config.auth;

    let (Some(url), Some(service_key)) = (auth.supabase_url(), auth.service_key()) else {
        anyhow::bail!("authentication is not configured: set SUPABASE_URL and SUPABASE_SERVICE_KEY");
    };

    let supabase: Arc<dyn AuthProvider> =
        Arc::new(SupabaseAuthProvider::new(client.clone(), url, service_key));

    match auth.jwt_secret() {
        Some(secret) => {
            info!("Verifying access tokens locally (HS256)");
            Ok(Arc::new(JwtAuthProvider::new(secret, supabase)))
        }
        None => {
            info!(url, "Verifying access tokens with the identity provider");
            Ok(supabase)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, ProviderConfig};

    fn configured() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth = AuthConfig {
            supabase_url: Some("https://project.supabase.co".to_string()),
            service_key: Some("service-key".to_string()),
            jwt_secret: None,
        };
        config.providers.openai = ProviderConfig {
            api_key: Some("sk-test".to_string()),
            base_url: None,
        };
        config
    }

    #[test]
    fn test_app_state_requires_auth_backend() {
        let Err(err) = create_app_state_with_config(&AppConfig::default()) else {
            panic!("app state must not build without an auth backend");
        };
        assert!(err.to_string().contains("authentication is not configured"));
    }

    #[test]
    fn test_app_state_defaults_to_in_memory_store() {
        let state = create_app_state_with_config(&configured()).unwrap();

        assert_eq!(state.vector_store.store_type(), "in_memory");
        assert_eq!(state.auth_provider.provider_name(), "supabase");
        assert_eq!(state.environment, "development");
    }

    #[test]
    fn test_app_state_uses_qdrant_and_local_jwt_when_configured() {
        let mut config = configured();
        config.vector_store.url = Some("http://localhost:6333".to_string());
        config.auth.jwt_secret = Some("secret".to_string());

        let state = create_app_state_with_config(&config).unwrap();

        assert_eq!(state.vector_store.store_type(), "qdrant");
        assert_eq!(state.auth_provider.provider_name(), "jwt");
    }
}
