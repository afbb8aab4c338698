//! Access guard configuration

use serde::{Deserialize, Serialize};

/// Header name and shared secret checked on every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Request header carrying the secret (default: "kode")
    #[serde(default = "default_header")]
    pub header: String,

    /// Expected header value (default: "ith")
    #[serde(default = "default_token")]
    pub token: String,
}

fn default_header() -> String {
    "kode".to_string()
}

fn default_token() -> String {
    "ith".to_string()
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            token: default_token(),
        }
    }
}

impl AccessConfig {
    /// Copy of this config with the secret masked, for display
    pub fn redacted(&self) -> Self {
        Self {
            header: self.header.clone(),
            token: "********".to_string(),
        }
    }
}
