//! Text generation domain models and traits

mod provider;
mod request;
mod response;

pub use provider::CompletionProvider;
pub use request::{
    CompletionRequest, DEFAULT_COMPLETION_MODEL, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
    MAX_TOKENS_LIMIT,
};
pub use response::{GenerationResult, ProviderCompletion};

#[cfg(test)]
pub use provider::mock::MockCompletionProvider;
