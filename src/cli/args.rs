//! CLI argument definitions using clap
//!
//! Commands:
//! - penjualan serve [--config <path>] [--host <host>] [--port <port>]
//! - penjualan config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Penjualan - an in-memory sales record service
#[derive(Parser, Debug)]
#[command(name = "penjualan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log HTTP requests at debug level (overridden by RUST_LOG)
    #[arg(global = true, short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the effective configuration with the secret redacted
    Config {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from(["penjualan", "serve", "--port", "8080", "--host", "127.0.0.1"])
            .unwrap();
        match cli.command {
            Command::Serve { config, host, port } => {
                assert!(config.is_none());
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_config_command() {
        let cli = Cli::try_parse_from(["penjualan", "-v", "config", "--config", "app.json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Config { config: Some(_) }));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["penjualan", "serve", "--port", "70000"]).is_err());
    }
}
