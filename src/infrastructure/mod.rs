//! Infrastructure layer - External service implementations

pub mod auth;
pub mod embedding;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod registry;
pub mod services;
pub mod vector_store;
