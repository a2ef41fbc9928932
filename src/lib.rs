//! Schema Constraints SDK - Shared library for merging validation
//! constraint metadata into OpenAPI schema descriptions
//!
//! Provides unified interfaces for:
//! - Constraint declarations and injected constraint sources
//! - Constraint-to-schema mapping (the core engine)
//! - Schema description nodes (Schema / Property / Items)
//! - Export of populated schemas as OpenAPI fragments
//! - Invariant validation of populated schemas

pub mod constraints;
pub mod describe;
pub mod export;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use constraints::{
    CallbackRegistry, ChoiceConstraint, ChoiceKey, ChoiceSet, Constraint, ConstraintRegistry,
    ConstraintSource, PropertyHandle,
};
pub use describe::{ClassDescriber, ConstraintMapper, MapError};
pub use export::{ExportError, SchemaExporter, SchemaFormat};
pub use models::{Items, Property, Schema};
pub use validation::{SchemaValidationResult, SchemaViolation, validate_schema};
