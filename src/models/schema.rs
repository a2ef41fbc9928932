//! OpenAPI-style schema description nodes
//!
//! A `Schema` describes one class as an OpenAPI object schema: an ordered
//! set of named `Property` nodes plus the list of required property names.
//! Every constraint-derived field starts unset (`None`) and is only written
//! when a constraint actually declares it, so emitters can distinguish
//! "not constrained" from any real value.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::collections::HashSet;

/// Object schema for one described class.
///
/// Properties keep their declaration order, which is also the order they
/// serialize in. The `required` list is kept dense and duplicate-free: every
/// mutation through [`Schema::mark_required`] re-compacts it.
///
/// # Example
///
/// ```rust
/// use schema_constraints_sdk::models::Schema;
///
/// let mut schema = Schema::new();
/// schema.add_property("username");
/// schema.mark_required("username");
/// assert_eq!(schema.required, vec!["username".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Property nodes in declaration order
    pub properties: Vec<Property>,
    /// Names of properties that must be present
    pub required: Vec<String>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property node, or return the existing node of the same name.
    ///
    /// Declaration order is preserved; adding a name twice does not create
    /// a second node.
    pub fn add_property(&mut self, name: impl Into<String>) -> &mut Property {
        let name = name.into();
        let index = match self.properties.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.properties.push(Property::new(name));
                self.properties.len() - 1
            }
        };
        &mut self.properties[index]
    }

    /// Look up a property node by name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Look up a property node by name, mutably
    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| p.name == name)
    }

    /// Mark a property as required.
    ///
    /// The name is appended only if not already present, and the list is
    /// re-compacted afterwards so it stays a dense, order-preserving
    /// sequence with no duplicates even if it was mutated by hand before.
    pub fn mark_required(&mut self, name: &str) {
        if !self.required.iter().any(|existing| existing == name) {
            self.required.push(name.to_string());
        }
        self.compact_required();
    }

    /// Drop duplicate required entries, keeping first occurrences in order
    fn compact_required(&mut self) {
        let mut seen = HashSet::new();
        self.required.retain(|name| seen.insert(name.clone()));
    }
}

impl Serialize for Schema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut len = 1;
        if !self.required.is_empty() {
            len += 1;
        }
        if !self.properties.is_empty() {
            len += 1;
        }
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", "object")?;
        if !self.required.is_empty() {
            map.serialize_entry("required", &self.required)?;
        }
        if !self.properties.is_empty() {
            map.serialize_entry("properties", &PropertyMap(&self.properties))?;
        }
        map.end()
    }
}

/// Serializes the property list as a JSON object keyed by property name,
/// preserving declaration order
struct PropertyMap<'a>(&'a [Property]);

impl Serialize for PropertyMap<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for property in self.0 {
            map.serialize_entry(&property.name, property)?;
        }
        map.end()
    }
}

/// One named property of an object schema.
///
/// All constraint-derived fields are `Option`al: `None` means the field was
/// never constrained and is omitted from serialized output.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name (becomes the key in the serialized properties object)
    #[serde(skip)]
    pub name: String,
    /// JSON Schema type, e.g. "string" or "array"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Whether null is an accepted value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Minimum string length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum string length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Regular expression the value must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Minimum number of items for collection values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// Maximum number of items for collection values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// Lower numeric bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    /// Upper numeric bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    /// Whether `minimum` is exclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    /// Whether `maximum` is exclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    /// Allowed values, dense and in declaration order
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
    /// Element schema for collection-valued properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Items>>,
}

impl Property {
    /// Create a property node with every field unset
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_type: None,
            nullable: None,
            min_length: None,
            max_length: None,
            pattern: None,
            min_items: None,
            max_items: None,
            minimum: None,
            maximum: None,
            exclusive_minimum: None,
            exclusive_maximum: None,
            enum_values: None,
            items: None,
        }
    }

    /// Return the nested items node, creating it if absent
    pub fn items_mut(&mut self) -> &mut Items {
        self.items.get_or_insert_with(|| Box::new(Items::new()))
    }

    /// Append a pattern fragment.
    ///
    /// A property can accumulate patterns from several declarations; later
    /// ones are joined onto the existing value with `", "` rather than
    /// replacing it.
    pub fn append_pattern(&mut self, pattern: &str) {
        match &mut self.pattern {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(pattern);
            }
            None => self.pattern = Some(pattern.to_string()),
        }
    }
}

/// Element schema of a collection-valued property
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Items {
    /// JSON Schema type of the elements
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Allowed element values, dense and in declaration order
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

impl Items {
    /// Create an items node with every field unset
    pub fn new() -> Self {
        Self::default()
    }
}
