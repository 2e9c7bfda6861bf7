//! Check command - reports the effective configuration without network I/O

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::ProviderName;
use crate::infrastructure::registry::{HttpProviderFactory, ProviderRegistry};

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let report = ConfigReport::from_config(&config);
    print!("{}", report.render());

    if !report.auth_configured {
        anyhow::bail!("authentication backend is not configured");
    }
    Ok(())
}

/// What the gateway would be able to serve with this configuration
#[derive(Debug)]
struct ConfigReport {
    environment: String,
    completion: Vec<ProviderName>,
    embedding: Vec<ProviderName>,
    auth_configured: bool,
    local_jwt: bool,
    vector_store: String,
}

impl ConfigReport {
    fn from_config(config: &AppConfig) -> Self {
        let registry = ProviderRegistry::new(
            config.providers.clone(),
            Arc::new(HttpProviderFactory::default()),
        );

        let vector_store = match config.vector_store.url() {
            Some(url) => format!("qdrant ({}, collection '{}')", url, config.vector_store.collection),
            None => format!("in-memory (collection '{}')", config.vector_store.collection),
        };

        Self {
            environment: config.environment.clone(),
            completion: registry.configured_completion_providers(),
            embedding: registry.configured_embedding_providers(),
            auth_configured: config.auth.is_configured(),
            local_jwt: config.auth.jwt_secret().is_some(),
            vector_store,
        }
    }

    fn render(&self) -> String {
        let list = |names: &[ProviderName]| {
            if names.is_empty() {
                "none".to_string()
            } else {
                names.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(", ")
            }
        };
        let auth = match (self.auth_configured, self.local_jwt) {
            (false, _) => "NOT CONFIGURED",
            (true, true) => "supabase (local JWT verification)",
            (true, false) => "supabase",
        };

        format!(
            "environment:          {}\n\
             completion providers: {}\n\
             embedding providers:  {}\n\
             auth:                 {}\n\
             vector store:         {}\n",
            self.environment,
            list(&self.completion),
            list(&self.embedding),
            auth,
            self.vector_store,
        )
    }
}
