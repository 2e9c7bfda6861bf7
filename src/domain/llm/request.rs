use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS_LIMIT: u32 = 4000;
const MAX_TEMPERATURE: f32 = 2.0;

/// A single-prompt completion request, already stripped of transport concerns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Check parameter ranges before any provider is contacted
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.prompt.trim().is_empty() {
            return Err(DomainError::validation("prompt must not be empty"));
        }

        if self.model.trim().is_empty() {
            return Err(DomainError::validation("model must not be empty"));
        }

        if self.max_tokens == 0 || self.max_tokens > MAX_TOKENS_LIMIT {
            return Err(DomainError::validation(format!(
                "max_tokens must be between 1 and {}, got {}",
                MAX_TOKENS_LIMIT, self.max_tokens
            )));
        }

        if !self.temperature.is_finite() || !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(DomainError::validation(format!(
                "temperature must be between 0.0 and {}, got {}",
                MAX_TEMPERATURE, self.temperature
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = CompletionRequest::new("Hello", "gpt-4o");
        assert_eq!(request.max_tokens, 500);
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(CompletionRequest::new("p", "m")
            .with_max_tokens(1)
            .with_temperature(0.0)
            .validate()
            .is_ok());
        assert!(CompletionRequest::new("p", "m")
            .with_max_tokens(4000)
            .with_temperature(2.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_rejects_empty_prompt() {
        let err = CompletionRequest::new("  ", "m").validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_max_tokens() {
        assert!(CompletionRequest::new("p", "m").with_max_tokens(0).validate().is_err());
        assert!(CompletionRequest::new("p", "m").with_max_tokens(4001).validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        assert!(CompletionRequest::new("p", "m").with_temperature(-0.1).validate().is_err());
        assert!(CompletionRequest::new("p", "m").with_temperature(2.1).validate().is_err());
        assert!(CompletionRequest::new("p", "m").with_temperature(f32::NAN).validate().is_err());
    }
}
