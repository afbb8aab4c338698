//! CLI command implementations
//!
//! `serve` is the only command that starts a runtime; `config` only reads
//! and prints.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::auth::{CredentialVerifier, StaticTokenVerifier};
use crate::http_server::HttpServer;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    init_tracing(cli.verbose);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, host, port } => {
            let config = resolve_config(config.as_deref(), host, port)?;
            serve(config)
        }
        Command::Config { config } => {
            let config = resolve_config(config.as_deref(), None, None)?;
            print_config(&config, &mut io::stdout())
        }
    }
}

/// Load, override and validate the effective configuration
pub fn resolve_config(
    path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<Config> {
    let mut config = Config::load_or_default(path)?;
    config.apply_overrides(host, port);
    config.validate()?;
    Ok(config)
}

/// Start the HTTP server and block until it stops
pub fn serve(config: Config) -> CliResult<()> {
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(
        StaticTokenVerifier::from_config(&config.access)
            .map_err(|e| CliError::config_error(e.to_string()))?,
    );

    let server = HttpServer::new(config.server, verifier);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Write the effective configuration as JSON, secret redacted
pub fn print_config<W: Write>(config: &Config, out: &mut W) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, &config.redacted())?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Request spans go to stderr; stdout carries the JSON event log
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });

    // Ignore a second initialization (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
