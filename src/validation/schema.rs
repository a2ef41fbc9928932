//! Schema invariant checks
//!
//! A schema produced by the mapper from well-formed declarations passes
//! every check here. Hosts that hand-build or post-edit schemas use this to
//! catch the cases an emitter would silently propagate: duplicate required
//! entries, dangling required names, crossed bounds, empty enums.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::models::Schema;

static KNOWN_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["string", "number", "integer", "boolean", "array", "object", "null"]
        .into_iter()
        .collect()
});

/// One invariant violation found in a schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaViolation {
    /// Name of the offending property, if the violation is property-scoped
    pub property: Option<String>,
    /// Human-readable description of the violation
    pub message: String,
}

/// Result of validating a schema
#[derive(Debug, Default)]
pub struct SchemaValidationResult {
    /// Violations found, in discovery order
    pub violations: Vec<SchemaViolation>,
}

impl SchemaValidationResult {
    /// Whether the schema passed every check
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check a populated schema against its structural invariants.
///
/// Checked: the required-list is dense and duplicate-free and every entry
/// names an existing property; per property, length/item/numeric bounds do
/// not cross, enums are non-empty, an enum lives on either the property or
/// its items node but not both, declared types are known JSON Schema types,
/// and pattern fields compile as regular expressions.
pub fn validate_schema(schema: &Schema) -> SchemaValidationResult {
    let mut violations = Vec::new();

    let mut seen = HashSet::new();
    for name in &schema.required {
        if !seen.insert(name.as_str()) {
            violations.push(SchemaViolation {
                property: Some(name.clone()),
                message: format!("required list contains '{}' more than once", name),
            });
        }
        if schema.property(name).is_none() {
            violations.push(SchemaViolation {
                property: Some(name.clone()),
                message: format!("required list names unknown property '{}'", name),
            });
        }
    }

    for property in &schema.properties {
        let mut report = |message: String| {
            violations.push(SchemaViolation {
                property: Some(property.name.clone()),
                message,
            });
        };

        if let (Some(min), Some(max)) = (property.min_length, property.max_length)
            && min > max
        {
            report(format!("minLength {} exceeds maxLength {}", min, max));
        }
        if let (Some(min), Some(max)) = (property.min_items, property.max_items)
            && min > max
        {
            report(format!("minItems {} exceeds maxItems {}", min, max));
        }
        if let (Some(min), Some(max)) = (property.minimum, property.maximum)
            && min > max
        {
            report(format!("minimum {} exceeds maximum {}", min, max));
        }

        if property.enum_values.as_ref().is_some_and(|v| v.is_empty()) {
            report("enum is present but empty".to_string());
        }
        let items_enum = property
            .items
            .as_ref()
            .and_then(|items| items.enum_values.as_ref());
        if items_enum.is_some_and(|v| v.is_empty()) {
            report("items enum is present but empty".to_string());
        }
        if property.enum_values.is_some() && items_enum.is_some() {
            report("enum set on both the property and its items node".to_string());
        }

        if let Some(schema_type) = &property.schema_type
            && !KNOWN_TYPES.contains(schema_type.as_str())
        {
            report(format!("unknown type '{}'", schema_type));
        }

        if let Some(pattern) = &property.pattern
            && let Err(error) = regex::Regex::new(pattern)
        {
            report(format!("pattern does not compile: {}", error));
        }
    }

    if !violations.is_empty() {
        tracing::warn!("schema validation found {} violation(s)", violations.len());
    }

    SchemaValidationResult { violations }
}
