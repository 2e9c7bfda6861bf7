use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Unsupported provider: {provider}")]
    UnsupportedProvider { provider: String },

    #[error("Provider '{provider}' is not configured: {message}")]
    MisconfiguredProvider { provider: String, message: String },

    #[error("Provider error: {provider} - {message}")]
    ProviderInvocation { provider: String, message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Storage write error: {message}")]
    StorageWrite { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn unsupported_provider(provider: impl Into<String>) -> Self {
        Self::UnsupportedProvider {
            provider: provider.into(),
        }
    }

    pub fn misconfigured_provider(
        provider: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::MisconfiguredProvider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn provider_invocation(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderInvocation {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn storage_write(message: impl Into<String>) -> Self {
        Self::StorageWrite {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "authentication",
            Self::UnsupportedProvider { .. } => "unsupported_provider",
            Self::MisconfiguredProvider { .. } => "misconfigured_provider",
            Self::ProviderInvocation { .. } => "provider_invocation",
            Self::Validation { .. } => "validation",
            Self::Storage { .. } => "storage",
            Self::StorageWrite { .. } => "storage_write",
            Self::Configuration { .. } => "configuration",
            Self::Internal { .. } => "internal",
        }
    }
}
