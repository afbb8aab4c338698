//! # Auth Module
//!
//! Access guard for the sales service: every request must present a
//! credential that a `CredentialVerifier` accepts.

pub mod config;
pub mod errors;
pub mod verifier;

pub use config::AccessConfig;
pub use errors::{AuthError, AuthResult};
pub use verifier::{CredentialVerifier, StaticTokenVerifier};
