//! Class describer
//!
//! Drives the once-per-class lifecycle: build a schema with one property
//! node per declared property, then run the mapper over every property.

use anyhow::{Context, Result};

use crate::constraints::{CallbackRegistry, ConstraintSource, PropertyHandle};
use crate::models::Schema;

use super::ConstraintMapper;

/// Builds a populated schema for one class.
///
/// # Example
///
/// ```rust
/// use schema_constraints_sdk::constraints::{Constraint, ConstraintRegistry};
/// use schema_constraints_sdk::describe::ClassDescriber;
///
/// let mut registry = ConstraintRegistry::new();
/// registry.declare("User", "name", vec![Constraint::NotBlank { allow_null: false }]);
///
/// let describer = ClassDescriber::new(&registry);
/// let schema = describer.describe("User", &["name", "nickname"]).unwrap();
///
/// assert_eq!(schema.required, vec!["name".to_string()]);
/// assert_eq!(schema.properties.len(), 2);
/// ```
pub struct ClassDescriber<'a> {
    mapper: ConstraintMapper<'a>,
}

impl<'a> ClassDescriber<'a> {
    /// Create a describer over a constraint source
    pub fn new(source: &'a dyn ConstraintSource) -> Self {
        Self {
            mapper: ConstraintMapper::new(source),
        }
    }

    /// Create a describer whose mapper can resolve named choice callbacks
    pub fn with_callbacks(source: &'a dyn ConstraintSource, callbacks: CallbackRegistry) -> Self {
        Self {
            mapper: ConstraintMapper::with_callbacks(source, callbacks),
        }
    }

    /// Describe a class: one property node per name, in the given order,
    /// populated from the declared constraints.
    ///
    /// # Arguments
    ///
    /// * `owner` - Name of the described type.
    /// * `properties` - Property names in declaration order.
    ///
    /// # Returns
    ///
    /// The populated schema, ready for an emitter.
    pub fn describe(&self, owner: &str, properties: &[&str]) -> Result<Schema> {
        let mut schema = Schema::new();
        for name in properties {
            schema.add_property(*name);
        }
        for name in properties {
            let handle = PropertyHandle::new(owner, *name);
            self.mapper
                .update_property(&handle, &mut schema)
                .with_context(|| format!("failed to apply constraints for {}::{}", owner, name))?;
        }
        Ok(schema)
    }
}
