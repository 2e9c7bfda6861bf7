//! Authentication domain - principals and the identity provider capability

mod principal;
mod provider;

pub use principal::{ExternalIdentityProvider, Principal};
pub use provider::AuthProvider;

#[cfg(test)]
pub use provider::MockAuthProvider;
