//! Validation functionality
//!
//! Invariant checks for populated schemas, run by hosts before emitting a
//! document. Checks never mutate the schema.

pub mod schema;

pub use schema::{SchemaValidationResult, SchemaViolation, validate_schema};
