//! Constraint source capability
//!
//! The mapper never inspects live objects. Whatever layer knows which rules
//! are attached to a property (an annotation parser, a derive macro, a
//! hand-written table) implements [`ConstraintSource`] and is injected.

use std::collections::HashMap;

use super::Constraint;

/// Identifies one property of one described type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyHandle {
    /// Name of the owning type
    pub owner: String,
    /// Property name, matching the schema's property node name
    pub name: String,
}

impl PropertyHandle {
    /// Create a handle for `owner::name`
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

/// Yields the ordered constraint declarations attached to a property
pub trait ConstraintSource {
    /// Constraints declared on the property, in declaration order.
    ///
    /// An empty list is normal and means the property is unconstrained.
    fn constraints_for(&self, handle: &PropertyHandle) -> Vec<Constraint>;
}

/// In-memory constraint source.
///
/// Hosts without a reflection layer declare constraints directly, keyed by
/// owning type and property name.
///
/// # Example
///
/// ```rust
/// use schema_constraints_sdk::constraints::{
///     Constraint, ConstraintRegistry, ConstraintSource, PropertyHandle,
/// };
///
/// let mut registry = ConstraintRegistry::new();
/// registry.declare("User", "name", vec![Constraint::NotBlank { allow_null: false }]);
///
/// let handle = PropertyHandle::new("User", "name");
/// assert_eq!(registry.constraints_for(&handle).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ConstraintRegistry {
    declarations: HashMap<PropertyHandle, Vec<Constraint>>,
}

impl ConstraintRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the constraints of one property.
    ///
    /// Declaring the same property again appends to the existing list,
    /// keeping earlier declarations first.
    pub fn declare(
        &mut self,
        owner: impl Into<String>,
        property: impl Into<String>,
        constraints: Vec<Constraint>,
    ) {
        let handle = PropertyHandle::new(owner, property);
        self.declarations.entry(handle).or_default().extend(constraints);
    }
}

impl ConstraintSource for ConstraintRegistry {
    fn constraints_for(&self, handle: &PropertyHandle) -> Vec<Constraint> {
        self.declarations.get(handle).cloned().unwrap_or_default()
    }
}
