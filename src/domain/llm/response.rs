use serde::{Deserialize, Serialize};

use crate::domain::usage::UsageStats;

/// What a completion provider hands back, usage already in canonical units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCompletion {
    pub text: String,
    pub usage: UsageStats,
}

impl ProviderCompletion {
    pub fn new(text: impl Into<String>, usage: UsageStats) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}

/// Canonical result of a text generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    /// Echo of the requested model identifier
    pub model: String,
    pub usage: UsageStats,
}

impl GenerationResult {
    pub fn new(text: impl Into<String>, model: impl Into<String>, usage: UsageStats) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            usage,
        }
    }
}
