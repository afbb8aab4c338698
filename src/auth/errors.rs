//! # Auth Errors
//!
//! Error types for the access guard.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Access guard errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    // ==================
    // Request Errors
    // ==================

    /// Credential header absent or not valid UTF-8
    #[error("access denied, invalid token")]
    MissingToken,

    /// Credential header present but does not match
    #[error("access denied, invalid token")]
    InvalidToken,

    // ==================
    // Configuration Errors
    // ==================

    /// Configured header name is not a legal HTTP header name
    #[error("invalid credential header name: {0}")]
    InvalidHeaderName(String),

    /// Configured secret is empty
    #[error("credential secret must not be empty")]
    EmptySecret,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 401,
            AuthError::InvalidToken => 401,

            AuthError::InvalidHeaderName(_) => 500,
            AuthError::EmptySecret => 500,
        }
    }

    /// Short machine-readable reason, used in logs
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing",
            AuthError::InvalidToken => "mismatch",
            AuthError::InvalidHeaderName(_) => "bad_header_name",
            AuthError::EmptySecret => "empty_secret",
        }
    }
}
