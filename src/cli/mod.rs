//! CLI module for the LLM Vector Gateway
//!
//! - `serve`: run the HTTP server
//! - `check`: validate configuration without starting the server

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};

/// LLM Vector Gateway - authenticated access to LLMs, embeddings and vector search
#[derive(Parser)]
#[command(name = "llm-vector-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Report which providers, auth backend and vector store are configured
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        assert!(matches!(
            Cli::try_parse_from(["llm-vector-gateway", "serve"]).unwrap().command,
            Command::Serve
        ));
        assert!(matches!(
            Cli::try_parse_from(["llm-vector-gateway", "check"]).unwrap().command,
            Command::Check
        ));
        assert!(Cli::try_parse_from(["llm-vector-gateway", "ui"]).is_err());
    }
}
