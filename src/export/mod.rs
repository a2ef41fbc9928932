//! Export functionality
//!
//! Renders populated schema value objects as OpenAPI schema-object
//! fragments. Document assembly and transport belong to the host.

pub mod openapi;

/// Output format for an exported schema fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub use openapi::SchemaExporter;
