//! Configuration section types
//!
//! A section keeps scalar and list-valued properties in two independent
//! mappings. The same key may live in both when the source defines it once in
//! each shape; each mapping keeps its own last-write-wins value.

use std::collections::HashMap;

/// All sections of one configuration load, keyed by section name
pub type Sections = HashMap<String, ConfigSection>;

/// A named group of configuration properties
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigSection {
    /// The section name (the trimmed header line)
    pub name: String,

    /// Scalar properties: key to single value
    pub properties: HashMap<String, String>,

    /// List properties: key to ordered values
    pub array_properties: HashMap<String, Vec<String>>,
}

impl ConfigSection {
    /// Create an empty section
    pub fn new(name: impl Into<String>) -> Self {
        ConfigSection {
            name: name.into(),
            properties: HashMap::new(),
            array_properties: HashMap::new(),
        }
    }

    /// Set a scalar property, replacing any earlier scalar value for `key`
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Set a list property, replacing any earlier list value for `key`
    pub fn add_array_property(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.array_properties.insert(key.into(), values);
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn array_property(&self, key: &str) -> Option<&[String]> {
        self.array_properties.get(key).map(Vec::as_slice)
    }

    /// Number of properties across both mappings
    pub fn len(&self) -> usize {
        self.properties.len() + self.array_properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.array_properties.is_empty()
    }
}
