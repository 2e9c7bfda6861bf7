use serde::Deserialize;

/// Origins every deployment accepts in addition to the configured ones
const LOCAL_DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Flat legacy variable names and the keys they override
const LEGACY_ENV_OVERRIDES: [(&str, &str); 9] = [
    ("ENVIRONMENT", "environment"),
    ("OPENAI_API_KEY", "providers.openai.api_key"),
    ("ANTHROPIC_API_KEY", "providers.anthropic.api_key"),
    ("SUPABASE_URL", "auth.supabase_url"),
    ("SUPABASE_SERVICE_KEY", "auth.service_key"),
    ("SUPABASE_JWT_SECRET", "auth.jwt_secret"),
    ("QDRANT_URL", "vector_store.url"),
    ("QDRANT_API_KEY", "vector_store.api_key"),
    ("QDRANT_COLLECTION_NAME", "vector_store.collection"),
];

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: String,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    pub cors: CorsConfig,
    pub providers: ProvidersConfig,
    pub auth: AuthConfig,
    pub vector_store: VectorStoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub request_timeout_secs: u64,
    pub openai: ProviderConfig,
    pub anthropic: ProviderConfig,
}

/// Credential and endpoint for one vendor; an absent or blank key means unconfigured
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub supabase_url: Option<String>,
    pub service_key: Option<String>,
    pub jwt_secret: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct VectorStoreConfig {
    /// Qdrant base URL; the in-memory store is used when unset
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub collection: String,
    pub ingest_concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            metrics: MetricsConfig::default(),
            cors: CorsConfig::default(),
            providers: ProvidersConfig::default(),
            auth: AuthConfig::default(),
            vector_store: VectorStoreConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 60,
            openai: ProviderConfig::default(),
            anthropic: ProviderConfig::default(),
        }
    }
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            collection: "default_collection".to_string(),
            ingest_concurrency: 8,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ProviderConfig {
    pub fn api_key(&self) -> Option<&str> {
        non_blank(&self.api_key)
    }

    pub fn base_url(&self) -> Option<&str> {
        non_blank(&self.base_url)
    }
}

impl AuthConfig {
    pub fn supabase_url(&self) -> Option<&str> {
        non_blank(&self.supabase_url)
    }

    pub fn service_key(&self) -> Option<&str> {
        non_blank(&self.service_key)
    }

    pub fn jwt_secret(&self) -> Option<&str> {
        non_blank(&self.jwt_secret)
    }

    /// True when tokens can be verified by some backend
    pub fn is_configured(&self) -> bool {
        self.supabase_url().is_some() && self.service_key().is_some()
    }
}

impl VectorStoreConfig {
    pub fn url(&self) -> Option<&str> {
        non_blank(&self.url)
    }

    pub fn api_key(&self) -> Option<&str> {
        non_blank(&self.api_key)
    }
}

// Secrets never reach the logs through Debug.
fn redact(value: &Option<String>) -> &'static str {
    if non_blank(value).is_some() {
        "[set]"
    } else {
        "[unset]"
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("supabase_url", &self.supabase_url)
            .field("service_key", &redact(&self.service_key))
            .field("jwt_secret", &redact(&self.jwt_secret))
            .finish()
    }
}

impl std::fmt::Debug for VectorStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStoreConfig")
            .field("url", &self.url)
            .field("api_key", &redact(&self.api_key))
            .field("collection", &self.collection)
            .field("ingest_concurrency", &self.ingest_concurrency)
            .finish()
    }
}

impl CorsConfig {
    /// Configured origins plus the local development origins, without duplicates
    pub fn origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = Vec::new();
        for origin in self
            .allowed_origins
            .iter()
            .map(String::as_str)
            .chain(LOCAL_DEV_ORIGINS)
        {
            let origin = origin.trim();
            if !origin.is_empty() && !origins.iter().any(|o| o == origin) {
                origins.push(origin.to_string());
            }
        }
        origins
    }
}

/// Split a comma-separated origin list, tolerating surrounding quotes
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);

    unquoted
        .split(',')
        .map(|origin| origin.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load layered configuration, resolving legacy variables through `lookup`
    pub fn load_with<F>(lookup: F) -> Result<Self, config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            );

        for (variable, key) in LEGACY_ENV_OVERRIDES {
            builder = builder.set_override_option(key, lookup(variable))?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        if let Some(raw) = lookup("CORS_ORIGINS") {
            app_config.cors.allowed_origins = parse_cors_origins(&raw);
        }

        Ok(app_config)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}
