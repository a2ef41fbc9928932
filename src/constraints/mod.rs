//! Constraint declarations
//!
//! Typed values for the validation rules a host attaches to class
//! properties. The set of kinds is closed; rules that validate things a
//! schema cannot express are declared as [`Constraint::Other`] and skipped
//! by the mapper.

pub mod source;

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

pub use source::{ConstraintRegistry, ConstraintSource, PropertyHandle};

/// One validation rule declared on a property.
///
/// Declarations are immutable values; the mapper folds over them in
/// declaration order. Optional attributes that are absent constrain
/// nothing: a `Length` with only `min` leaves the maximum side of the
/// schema untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Value must be non-empty; `allow_null` exempts null values, which
    /// also makes the property optional
    NotBlank {
        /// When true, null passes validation and the property stays optional
        allow_null: bool,
    },
    /// Value must not be null; always marks the property required
    NotNull,
    /// String length bounds, each side independent
    Length {
        /// Minimum length, if declared
        min: Option<u64>,
        /// Maximum length, if declared
        max: Option<u64>,
    },
    /// Value must match a regular expression
    Regex {
        /// The pattern source text
        pattern: String,
    },
    /// Collection cardinality bounds, each side independent
    Count {
        /// Minimum number of elements, if declared
        min: Option<u64>,
        /// Maximum number of elements, if declared
        max: Option<u64>,
    },
    /// Numeric value bounds, each side independent
    Range {
        /// Lower bound, if declared
        min: Option<i64>,
        /// Upper bound, if declared
        max: Option<i64>,
    },
    /// Value must be strictly below the given bound
    LessThan { value: i64 },
    /// Value must be at or below the given bound
    LessThanOrEqual { value: i64 },
    /// Value must be strictly above the given bound
    GreaterThan { value: i64 },
    /// Value must be at or above the given bound
    GreaterThanOrEqual { value: i64 },
    /// Value must come from a declared set of allowed values
    Choice(ChoiceConstraint),
    /// A validator rule with no schema counterpart (e.g. an email or IP
    /// format check); the mapper ignores these
    Other(String),
}

/// Allowed-value rule for a property.
///
/// The value set is declared inline (plain or keyed) or deferred to a named
/// callback resolved when the constraint is applied. With `multiple` the
/// property holds a collection and the allowed values apply to its
/// elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChoiceConstraint {
    /// Inline value set, if declared
    pub choices: Option<ChoiceSet>,
    /// Name of a registered callback producing the value set, if declared
    pub callback: Option<String>,
    /// Whether values may be picked in combination (collection semantics)
    pub multiple: bool,
}

impl ChoiceConstraint {
    /// Choice over a plain ordered list of values
    pub fn values(values: Vec<Value>) -> Self {
        Self {
            choices: Some(ChoiceSet::List(values)),
            ..Self::default()
        }
    }

    /// Choice over an ordered keyed value set; keys are discarded when the
    /// constraint is mapped
    pub fn keyed(entries: Vec<(ChoiceKey, Value)>) -> Self {
        Self {
            choices: Some(ChoiceSet::Keyed(entries)),
            ..Self::default()
        }
    }

    /// Choice whose value set comes from a named registered callback
    pub fn callback(name: impl Into<String>) -> Self {
        Self {
            callback: Some(name.into()),
            ..Self::default()
        }
    }

    /// Switch to collection semantics (allowed values apply to elements)
    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }
}

/// Key of one entry in a keyed choice set
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceKey {
    /// Positional key, possibly sparse or out of sequence
    Index(i64),
    /// Named key
    Name(String),
}

/// A resolved choice value set.
///
/// Keyed sets model source arrays with sparse integer or string keys.
/// Mapping never preserves those keys: [`ChoiceSet::into_values`] yields
/// the values alone as a dense list in original entry order.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceSet {
    /// Plain ordered list of values
    List(Vec<Value>),
    /// Key/value entries in declaration order
    Keyed(Vec<(ChoiceKey, Value)>),
}

impl ChoiceSet {
    /// Extract the values as a dense ordered list, dropping any keys
    pub fn into_values(self) -> Vec<Value> {
        match self {
            ChoiceSet::List(values) => values,
            ChoiceSet::Keyed(entries) => entries.into_iter().map(|(_, value)| value).collect(),
        }
    }
}

/// Zero-argument resolver producing a choice value set
pub type ChoiceResolver = Box<dyn Fn() -> ChoiceSet + Send + Sync>;

/// Named callbacks for choice value sets resolved at mapping time.
///
/// Hosts register a resolver per callback name; a `Choice` constraint
/// referencing an unregistered name is a mapping error, never silently
/// skipped.
#[derive(Default)]
pub struct CallbackRegistry {
    resolvers: HashMap<String, ChoiceResolver>,
}

impl CallbackRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver under a callback name, replacing any previous
    /// resolver of the same name
    pub fn register<F>(&mut self, name: impl Into<String>, resolver: F)
    where
        F: Fn() -> ChoiceSet + Send + Sync + 'static,
    {
        self.resolvers.insert(name.into(), Box::new(resolver));
    }

    /// Invoke the resolver registered under `name`
    pub fn resolve(&self, name: &str) -> Option<ChoiceSet> {
        self.resolvers.get(name).map(|resolver| resolver())
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("resolvers", &self.resolvers.keys().collect::<Vec<_>>())
            .finish()
    }
}
