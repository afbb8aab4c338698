//! # Sales Errors
//!
//! Error types for the sales record store and its validator.

use serde::Serialize;
use thiserror::Error;

/// Result type for sales operations
pub type SalesResult<T> = Result<T, SalesError>;

/// A single violated field rule.
///
/// Serialized in the shape existing clients already parse:
/// `{"type": "field", "value": ..., "msg": ..., "path": ..., "location": "body"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The sanitized value that failed the rule
    pub value: String,
    pub msg: String,
    /// Wire name of the offending field
    pub path: String,
    pub location: &'static str,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, value: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            kind: "field",
            value: value.into(),
            msg: msg.into(),
            path: path.into(),
            location: "body",
        }
    }
}

/// Sales store errors
#[derive(Debug, Clone, Error)]
pub enum SalesError {
    /// One or more field rules failed
    #[error("validation failed: {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// No record carries the requested id
    #[error("sales data not found")]
    NotFound,

    /// Store state could not be accessed
    #[error("storage error: {0}")]
    StorageError(String),
}

impl SalesError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            SalesError::Validation(_) => 400,
            SalesError::NotFound => 404,
            SalesError::StorageError(_) => 500,
        }
    }

    /// Returns whether this error was caused by the request
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
