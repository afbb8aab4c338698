//! # Sales Module
//!
//! The sales record table and the rules a payload must pass before it
//! reaches the table.
//!
//! - `SalesStore`: insertion-ordered records with a monotonic id counter
//! - `validator`: required and optional rule sets for incoming payloads

pub mod errors;
pub mod record;
pub mod store;
pub mod validator;

pub use errors::{FieldViolation, SalesError, SalesResult};
pub use record::{SalesFields, SalesId, SalesPatch, SalesRecord};
pub use store::SalesStore;
pub use validator::{validate_fields, validate_patch};
