//! HTTP Server Configuration
//!
//! Configuration for the HTTP server including host, port, and CORS settings.

use axum::http::{HeaderValue, Uri};
use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse every configured CORS origin, failing on the first bad entry
    pub fn allowed_origins(&self) -> Result<Vec<HeaderValue>, String> {
        self.cors_origins.iter().map(String::as_str).map(parse_origin).collect()
    }
}

/// An origin is `scheme://host[:port]` with nothing after the authority.
///
/// Browsers send `Origin` without a trailing slash or path, so either would
/// never match.
pub fn parse_origin(origin: &str) -> Result<HeaderValue, String> {
    let invalid = |why: &str| format!("invalid CORS origin '{}': {}", origin, why);

    let uri: Uri = origin.parse().map_err(|_| invalid("not a URI"))?;
    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        _ => return Err(invalid("scheme must be http or https")),
    }
    if uri.authority().is_none() {
        return Err(invalid("missing host"));
    }
    if origin.ends_with('/') || uri.path() != "/" || uri.query().is_some() {
        return Err(invalid("must not contain a path"));
    }

    HeaderValue::from_str(origin).map_err(|_| invalid("not a valid header value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_allowed_origins() {
        let config = HttpServerConfig {
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "https://shop.example.com".to_string(),
            ],
            ..Default::default()
        };

        let origins = config.allowed_origins().unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:5173");
    }

    #[test]
    fn test_parse_origin_rejects_typos() {
        for bad in [
            "localhost:5173",
            "http//localhost",
            "ftp://files.example.com",
            "http://localhost:5173/",
            "https://shop.example.com/app",
            "http://a b",
            "",
        ] {
            assert!(parse_origin(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_missing_fields_default() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
    }
}
