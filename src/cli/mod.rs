//! CLI module
//!
//! Provides the command-line interface:
//! - serve: start the HTTP server
//! - config: print the effective configuration

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{print_config, resolve_config, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
