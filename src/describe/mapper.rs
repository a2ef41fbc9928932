//! Constraint-to-schema mapper
//!
//! The core engine: reads the constraint declarations attached to one
//! property and folds them, in declaration order, into the matching
//! property node of a schema.

use crate::constraints::{
    CallbackRegistry, ChoiceConstraint, ChoiceSet, Constraint, ConstraintSource, PropertyHandle,
};
use crate::models::Schema;

use super::MapError;

/// Applies declared constraints to schema property nodes.
///
/// The mapper holds no per-schema state: each [`update_property`] call is a
/// deterministic fold over that property's declarations. The only state it
/// touches beyond the named property node (and, for multiple-value choices,
/// that node's items child) is the schema's required-list.
///
/// [`update_property`]: ConstraintMapper::update_property
///
/// # Example
///
/// ```rust
/// use schema_constraints_sdk::constraints::{
///     Constraint, ConstraintRegistry, PropertyHandle,
/// };
/// use schema_constraints_sdk::describe::ConstraintMapper;
/// use schema_constraints_sdk::models::Schema;
///
/// let mut registry = ConstraintRegistry::new();
/// registry.declare("User", "name", vec![
///     Constraint::NotBlank { allow_null: false },
///     Constraint::Length { min: Some(1), max: None },
/// ]);
///
/// let mut schema = Schema::new();
/// schema.add_property("name");
///
/// let mapper = ConstraintMapper::new(&registry);
/// mapper.update_property(&PropertyHandle::new("User", "name"), &mut schema).unwrap();
///
/// assert_eq!(schema.required, vec!["name".to_string()]);
/// assert_eq!(schema.property("name").and_then(|p| p.min_length), Some(1));
/// assert_eq!(schema.property("name").and_then(|p| p.max_length), None);
/// ```
pub struct ConstraintMapper<'a> {
    source: &'a dyn ConstraintSource,
    callbacks: CallbackRegistry,
}

impl<'a> ConstraintMapper<'a> {
    /// Create a mapper over a constraint source, with no choice callbacks
    pub fn new(source: &'a dyn ConstraintSource) -> Self {
        Self {
            source,
            callbacks: CallbackRegistry::new(),
        }
    }

    /// Create a mapper that can resolve named choice callbacks
    pub fn with_callbacks(source: &'a dyn ConstraintSource, callbacks: CallbackRegistry) -> Self {
        Self { source, callbacks }
    }

    /// Apply every constraint declared on `handle` to its schema node.
    ///
    /// Constraints are applied in declaration order; for scalar fields a
    /// later declaration of the same kind wins. If the schema holds no
    /// property node under the handle's name the call is a no-op.
    ///
    /// # Errors
    ///
    /// Fails when a choice constraint names a callback with no registered
    /// resolver; there is no safe default for an allowed-value set.
    pub fn update_property(
        &self,
        handle: &PropertyHandle,
        schema: &mut Schema,
    ) -> Result<(), MapError> {
        if schema.property(&handle.name).is_none() {
            return Ok(());
        }
        for constraint in self.source.constraints_for(handle) {
            self.apply(&constraint, handle, schema)?;
        }
        Ok(())
    }

    fn apply(
        &self,
        constraint: &Constraint,
        handle: &PropertyHandle,
        schema: &mut Schema,
    ) -> Result<(), MapError> {
        match constraint {
            Constraint::NotBlank { allow_null } => {
                if !allow_null {
                    schema.mark_required(&handle.name);
                }
            }
            Constraint::NotNull => schema.mark_required(&handle.name),
            Constraint::Length { min, max } => {
                if let Some(property) = schema.property_mut(&handle.name) {
                    if let Some(min) = min {
                        property.min_length = Some(*min);
                    }
                    if let Some(max) = max {
                        property.max_length = Some(*max);
                    }
                }
            }
            Constraint::Regex { pattern } => {
                if let Some(property) = schema.property_mut(&handle.name) {
                    property.append_pattern(pattern);
                }
            }
            Constraint::Count { min, max } => {
                if let Some(property) = schema.property_mut(&handle.name) {
                    if let Some(min) = min {
                        property.min_items = Some(*min);
                    }
                    if let Some(max) = max {
                        property.max_items = Some(*max);
                    }
                }
            }
            Constraint::Range { min, max } => {
                if let Some(property) = schema.property_mut(&handle.name) {
                    if let Some(min) = min {
                        property.minimum = Some(*min);
                    }
                    if let Some(max) = max {
                        property.maximum = Some(*max);
                    }
                }
            }
            Constraint::LessThan { value } => {
                if let Some(property) = schema.property_mut(&handle.name) {
                    property.maximum = Some(*value);
                    property.exclusive_maximum = Some(true);
                }
            }
            Constraint::LessThanOrEqual { value } => {
                if let Some(property) = schema.property_mut(&handle.name) {
                    property.maximum = Some(*value);
                }
            }
            Constraint::GreaterThan { value } => {
                if let Some(property) = schema.property_mut(&handle.name) {
                    property.minimum = Some(*value);
                    property.exclusive_minimum = Some(true);
                }
            }
            Constraint::GreaterThanOrEqual { value } => {
                if let Some(property) = schema.property_mut(&handle.name) {
                    property.minimum = Some(*value);
                }
            }
            Constraint::Choice(choice) => self.apply_choice(choice, handle, schema)?,
            Constraint::Other(name) => {
                tracing::debug!(
                    "constraint '{}' on property '{}' has no schema mapping, skipping",
                    name,
                    handle.name
                );
            }
        }
        Ok(())
    }

    /// Set the allowed-value list from a choice declaration.
    ///
    /// The value set is re-indexed into a dense list (keys dropped) before
    /// assignment. With `multiple` the list lands on the property's items
    /// node instead of the property itself.
    fn apply_choice(
        &self,
        choice: &ChoiceConstraint,
        handle: &PropertyHandle,
        schema: &mut Schema,
    ) -> Result<(), MapError> {
        let set: Option<ChoiceSet> = match &choice.callback {
            Some(name) => Some(
                self.callbacks
                    .resolve(name)
                    .ok_or_else(|| MapError::UnknownCallback(name.clone()))?,
            ),
            None => choice.choices.clone(),
        };

        // A choice that declares neither an inline set nor a callback
        // constrains nothing.
        let Some(set) = set else {
            return Ok(());
        };
        let values = set.into_values();

        let Some(property) = schema.property_mut(&handle.name) else {
            return Ok(());
        };
        if choice.multiple {
            property.items_mut().enum_values = Some(values);
        } else {
            property.enum_values = Some(values);
        }
        Ok(())
    }
}
