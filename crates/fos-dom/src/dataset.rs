//! DOMStringMap (dataset)
//!
//! camelCase view over `data-*` attributes.

use std::collections::HashMap;

use crate::attributes::NamedNodeMap;

/// Snapshot of an element's data-* attributes keyed by camelCase name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMStringMap {
    data: HashMap<String, String>,
}

impl DOMStringMap {
    /// Create from an attribute collection
    pub fn from_attributes(attrs: &NamedNodeMap) -> Self {
        let data = attrs
            .iter()
            .filter(|attr| attr.is_data())
            .map(|attr| (to_camel_case(&attr.name["data-".len()..]), attr.value.clone()))
            .collect();
        Self { data }
    }

    /// Get value by camelCase key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|s| s.as_str())
    }

    /// Convert camelCase key to its attribute name
    pub fn to_attribute_name(key: &str) -> String {
        format!("data-{}", to_kebab_case(key))
    }
}

/// Convert kebab-case to camelCase
fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert camelCase to kebab-case
fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}
