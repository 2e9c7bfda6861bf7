//! Provider registry - resolves a provider name to a shared, configured instance

mod factory;

pub use factory::{HttpProviderFactory, ProviderFactory};

#[cfg(test)]
pub use factory::mock::{CountingProviderFactory, FixedProviderFactory};

use moka::future::Cache;
use std::sync::Arc;
use tracing::debug;

use crate::config::{ProviderConfig, ProvidersConfig};
use crate::domain::{CompletionProvider, DomainError, EmbeddingProvider, ProviderName};

/// Which capability is being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capability {
    Completion,
    Embedding,
}

impl Capability {
    fn supported_by(self, name: ProviderName) -> bool {
        match self {
            Self::Completion => name.supports_completion(),
            Self::Embedding => name.supports_embedding(),
        }
    }
}

/// Construct-once registry of completion and embedding providers.
///
/// Each capability has its own cache; the first resolution of a name builds
/// the instance through the [`ProviderFactory`], concurrent first callers wait
/// for that single construction, and later callers get the same `Arc`.
#[derive(Debug)]
pub struct ProviderRegistry {
    providers: ProvidersConfig,
    factory: Arc<dyn ProviderFactory>,
    completion: Cache<ProviderName, Arc<dyn CompletionProvider>>,
    embedding: Cache<ProviderName, Arc<dyn EmbeddingProvider>>,
}

impl ProviderRegistry {
    pub fn new(providers: ProvidersConfig, factory: Arc<dyn ProviderFactory>) -> Self {
        let capacity = ProviderName::ALL.len() as u64;

        Self {
            providers,
            factory,
            completion: Cache::builder().max_capacity(capacity).build(),
            embedding: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Registry with every provider keyed, backed by `factory`
    #[cfg(test)]
    pub fn for_tests(factory: Arc<dyn ProviderFactory>) -> Self {
        let keyed = |key: &str| ProviderConfig {
            api_key: Some(key.to_string()),
            base_url: None,
        };

        Self::new(
            ProvidersConfig {
                request_timeout_secs: 5,
                openai: keyed("sk-test-openai"),
                anthropic: keyed("sk-test-anthropic"),
            },
            factory,
        )
    }

    fn settings(&self, name: ProviderName) -> &ProviderConfig {
        match name {
            ProviderName::OpenAi => &self.providers.openai,
            ProviderName::Anthropic => &self.providers.anthropic,
        }
    }

    /// Name recognized, capability supported, credential present
    fn check(&self, raw_name: &str, capability: Capability) -> Result<(ProviderName, String), DomainError> {
        let name: ProviderName = raw_name.parse()?;

        if !capability.supported_by(name) {
            return Err(DomainError::unsupported_provider(name.as_str()));
        }

        let api_key = self.settings(name).api_key().ok_or_else(|| {
            DomainError::misconfigured_provider(name.as_str(), "API key not configured")
        })?;

        Ok((name, api_key.to_string()))
    }

    pub async fn resolve_completion_provider(
        &self,
        name: &str,
    ) -> Result<Arc<dyn CompletionProvider>, DomainError> {
        let (name, api_key) = self.check(name, Capability::Completion)?;
        let base_url = self.settings(name).base_url();

        self.completion
            .try_get_with(name, async {
                debug!(provider = %name, "Constructing completion provider");
                self.factory.create_completion(name, &api_key, base_url)
            })
            .await
            .map_err(|e: Arc<DomainError>| (*e).clone())
    }

    pub async fn resolve_embedding_provider(
        &self,
        name: &str,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        let (name, api_key) = self.check(name, Capability::Embedding)?;
        let base_url = self.settings(name).base_url();

        self.embedding
            .try_get_with(name, async {
                debug!(provider = %name, "Constructing embedding provider");
                self.factory.create_embedding(name, &api_key, base_url)
            })
            .await
            .map_err(|e: Arc<DomainError>| (*e).clone())
    }

    /// Names that would resolve as completion providers
    pub fn configured_completion_providers(&self) -> Vec<ProviderName> {
        self.configured(Capability::Completion)
    }

    /// Names that would resolve as embedding providers
    pub fn configured_embedding_providers(&self) -> Vec<ProviderName> {
        self.configured(Capability::Embedding)
    }

    fn configured(&self, capability: Capability) -> Vec<ProviderName> {
        ProviderName::ALL
            .into_iter()
            .filter(|name| self.check(name.as_str(), capability).is_ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn providers(openai: Option<&str>, anthropic: Option<&str>) -> ProvidersConfig {
        ProvidersConfig {
            request_timeout_secs: 5,
            openai: ProviderConfig {
                api_key: openai.map(String::from),
                base_url: None,
            },
            anthropic: ProviderConfig {
                api_key: anthropic.map(String::from),
                base_url: None,
            },
        }
    }

    fn build_registry(
        openai: Option<&str>,
        anthropic: Option<&str>,
    ) -> (ProviderRegistry, Arc<CountingProviderFactory>) {
        let factory = Arc::new(CountingProviderFactory::new());
        let registry = ProviderRegistry::new(providers(openai, anthropic), factory.clone());
        (registry, factory)
    }

    #[tokio::test]
    async fn test_same_instance_per_name() {
        let (registry, factory) = build_registry(Some("sk-openai"), Some("sk-ant"));

        let first = registry.resolve_completion_provider("openai").await.unwrap();
        let second = registry.resolve_completion_provider("openai").await.unwrap();
        let other = registry.resolve_completion_provider("anthropic").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(factory.completion_constructions(), 2);
    }

    #[tokio::test]
    async fn test_embedding_cache_is_independent() {
        let (registry, factory) = build_registry(Some("sk-openai"), None);

        let completion = registry.resolve_completion_provider("openai").await.unwrap();
        let first = registry.resolve_embedding_provider("openai").await.unwrap();
        let second = registry.resolve_embedding_provider("openai").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(completion.provider_name(), "openai");
        assert_eq!(factory.completion_constructions(), 1);
        assert_eq!(factory.embedding_constructions(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_provider() {
        let (registry, factory) = build_registry(Some("sk-openai"), Some("sk-ant"));

        let err = registry.resolve_completion_provider("cohere").await.unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedProvider { .. }));

        let err = registry.resolve_embedding_provider("").await.unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedProvider { .. }));

        assert_eq!(factory.completion_constructions(), 0);
        assert_eq!(factory.embedding_constructions(), 0);
    }

    #[tokio::test]
    async fn test_anthropic_embeddings_are_unsupported_even_when_configured() {
        let (registry, factory) = build_registry(None, Some("sk-ant"));

        let err = registry.resolve_embedding_provider("anthropic").await.unwrap_err();

        assert!(matches!(err, DomainError::UnsupportedProvider { ref provider } if provider == "anthropic"));
        assert_eq!(factory.embedding_constructions(), 0);
    }

    #[tokio::test]
    async fn test_missing_or_blank_credential_is_misconfigured() {
        let (registry, factory) = build_registry(Some("  "), None);

        let err = registry.resolve_completion_provider("openai").await.unwrap_err();
        assert!(matches!(err, DomainError::MisconfiguredProvider { ref provider, .. } if provider == "openai"));

        let err = registry.resolve_completion_provider("anthropic").await.unwrap_err();
        assert!(matches!(err, DomainError::MisconfiguredProvider { .. }));

        assert_eq!(factory.completion_constructions(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_first_use_constructs_once() {
        let (registry, factory) = build_registry(Some("sk-openai"), None);
        let registry = Arc::new(registry);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.resolve_completion_provider("openai").await })
            })
            .collect();

        let mut resolved = Vec::new();
        for handle in handles {
            resolved.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(factory.completion_constructions(), 1);
        assert!(resolved.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    }

    #[test]
    fn test_configured_provider_lists() {
        let (registry, _) = build_registry(Some("sk-openai"), Some("sk-ant"));

        assert_eq!(
            registry.configured_completion_providers(),
            vec![ProviderName::OpenAi, ProviderName::Anthropic]
        );
        assert_eq!(registry.configured_embedding_providers(), vec![ProviderName::OpenAi]);

        let (registry, _) = build_registry(None, None);
        assert!(registry.configured_completion_providers().is_empty());
    }
}
