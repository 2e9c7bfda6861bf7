//! API layer - HTTP endpoints and middleware

pub mod auth;
pub mod health;
pub mod llm;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;
pub mod vectordb;

pub use middleware::RequireUser;
pub use router::create_router;
pub use state::AppState;
