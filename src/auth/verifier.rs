//! # Credential Verification
//!
//! The access guard asks a `CredentialVerifier` whether a request may pass.
//! `StaticTokenVerifier` compares one header against a shared secret.

use axum::http::{HeaderMap, HeaderName};
use subtle::ConstantTimeEq;

use super::config::AccessConfig;
use super::errors::{AuthError, AuthResult};

/// Decides whether a request's credentials allow it through.
pub trait CredentialVerifier: Send + Sync {
    /// `Ok(())` allows the request, `Err` denies it.
    fn verify(&self, headers: &HeaderMap) -> AuthResult<()>;
}

/// Shared-secret check on a single request header
#[derive(Debug, Clone)]
pub struct StaticTokenVerifier {
    header: HeaderName,
    token: String,
}

impl StaticTokenVerifier {
    /// Create a verifier for `header`, expecting exactly `token`
    pub fn new(header: &str, token: impl Into<String>) -> AuthResult<Self> {
        let header = HeaderName::from_bytes(header.as_bytes())
            .map_err(|_| AuthError::InvalidHeaderName(header.to_string()))?;

        let token = token.into();
        if token.is_empty() {
            return Err(AuthError::EmptySecret);
        }

        Ok(Self { header, token })
    }

    /// Create a verifier from configuration
    pub fn from_config(config: &AccessConfig) -> AuthResult<Self> {
        Self::new(&config.header, config.token.clone())
    }

    /// Header this verifier reads
    pub fn header(&self) -> &HeaderName {
        &self.header
    }
}

impl CredentialVerifier for StaticTokenVerifier {
    fn verify(&self, headers: &HeaderMap) -> AuthResult<()> {
        let presented = headers
            .get(&self.header)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        if constant_time_str_eq(presented, &self.token) {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

/// Constant-time comparison of two strings
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(name: &'static str, value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn test_matching_token_passes() {
        let verifier = StaticTokenVerifier::new("kode", "ith").unwrap();
        assert!(verifier.verify(&headers("kode", "ith")).is_ok());
    }

    #[test]
    fn test_missing_header_denied() {
        let verifier = StaticTokenVerifier::new("kode", "ith").unwrap();
        assert_eq!(
            verifier.verify(&HeaderMap::new()),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn test_wrong_token_denied() {
        let verifier = StaticTokenVerifier::new("kode", "ith").unwrap();
        assert_eq!(
            verifier.verify(&headers("kode", "ITH")),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(
            verifier.verify(&headers("kode", "ith ")),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(
            verifier.verify(&headers("kode", "")),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        let verifier = StaticTokenVerifier::new("Kode", "ith").unwrap();
        assert!(verifier.verify(&headers("kode", "ith")).is_ok());
    }

    #[test]
    fn test_other_header_ignored() {
        let verifier = StaticTokenVerifier::new("kode", "ith").unwrap();
        assert!(verifier.verify(&headers("authorization", "ith")).is_err());
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            StaticTokenVerifier::new("bad header", "ith"),
            Err(AuthError::InvalidHeaderName(_))
        ));
        assert!(matches!(
            StaticTokenVerifier::new("kode", ""),
            Err(AuthError::EmptySecret)
        ));
    }

    #[test]
    fn test_constant_time_comparison() {
        assert!(constant_time_str_eq("hello", "hello"));
        assert!(!constant_time_str_eq("hello", "world"));
        assert!(!constant_time_str_eq("hello", "hello!"));
    }
}
