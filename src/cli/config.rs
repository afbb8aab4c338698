//! Configuration file structure
//!
//! ```json
//! {
//!   "server": { "host": "0.0.0.0", "port": 3000, "cors_origins": [] },
//!   "access": { "header": "kode", "token": "ith" }
//! }
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::auth::{AccessConfig, StaticTokenVerifier};
use crate::http_server::HttpServerConfig;

use super::errors::{CliError, CliResult};

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub access: AccessConfig,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            CliError::config_error(format!("Invalid config '{}': {}", path.display(), e))
        })
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Command-line flags win over file values
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> CliResult<()> {
        if self.server.port == 0 {
            return Err(CliError::config_error("server.port must be non-zero"));
        }

        self.server.allowed_origins().map_err(CliError::config_error)?;

        StaticTokenVerifier::from_config(&self.access)
            .map_err(|e| CliError::config_error(e.to_string()))?;

        Ok(())
    }

    /// Copy safe to print
    pub fn redacted(&self) -> Self {
        Self {
            server: self.server.clone(),
            access: self.access.redacted(),
        }
    }
}
