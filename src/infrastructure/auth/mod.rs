//! Authentication infrastructure module
//!
//! Token verification against the hosted identity provider, optionally
//! short-circuited by local JWT signature checks.

mod jwt;
mod supabase;

pub use jwt::{JwtAuthProvider, JwtClaims};
pub use supabase::SupabaseAuthProvider;
