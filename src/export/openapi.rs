//! OpenAPI schema fragment exporter

use crate::models::Schema;

use super::{ExportError, SchemaFormat};

/// Renders a schema as an OpenAPI schema-object fragment.
///
/// Unset property fields are omitted, field names use OpenAPI casing
/// (`minLength`, `maxLength`, `enum`, …) and properties appear in
/// declaration order.
#[derive(Debug, Default)]
pub struct SchemaExporter;

impl SchemaExporter {
    /// Create a new exporter
    pub fn new() -> Self {
        Self
    }

    /// Render `schema` in the requested format.
    ///
    /// # Arguments
    ///
    /// * `schema` - The populated schema value object.
    /// * `format` - Target serialization format.
    ///
    /// # Returns
    ///
    /// The schema fragment as a string in the requested format.
    pub fn export(&self, schema: &Schema, format: SchemaFormat) -> Result<String, ExportError> {
        match format {
            SchemaFormat::Json => serde_json::to_string_pretty(schema).map_err(|e| {
                ExportError::SerializationError(format!("Failed to serialize to JSON: {}", e))
            }),
            SchemaFormat::Yaml => serde_yaml::to_string(schema).map_err(|e| {
                ExportError::SerializationError(format!("Failed to serialize to YAML: {}", e))
            }),
        }
    }
}
