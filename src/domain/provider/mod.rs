//! Provider naming and capability support

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Closed set of vendors the gateway knows how to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    OpenAi,
    Anthropic,
}

impl ProviderName {
    pub const ALL: [ProviderName; 2] = [ProviderName::OpenAi, ProviderName::Anthropic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// Whether the vendor offers text generation through this gateway
    pub fn supports_completion(&self) -> bool {
        true
    }

    /// Whether the vendor offers a real embedding API through this gateway
    pub fn supports_embedding(&self) -> bool {
        matches!(self, Self::OpenAi)
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(DomainError::unsupported_provider(other)),
        }
    }
}
