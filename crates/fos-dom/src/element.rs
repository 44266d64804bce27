//! Element
//!
//! Element data plus the form-control state a headless page needs.

use crate::NodeId;
use crate::attributes::NamedNodeMap;
use crate::dataset::DOMStringMap;

/// Input type of a form control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Date,
    Number,
    Radio,
    Checkbox,
    Submit,
}

impl InputType {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "date" => Self::Date,
            "number" => Self::Number,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "submit" => Self::Submit,
            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Date => "date",
            Self::Number => "number",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Submit => "submit",
        }
    }
}

/// Inline `display` style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// No inline style set
    #[default]
    Unset,
    Block,
    None,
}

/// Element node
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub attrs: NamedNodeMap,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub display: Display,
    /// Form control value (text inputs, radio value attribute)
    pub value: String,
    /// Checkedness for radio buttons and checkboxes
    pub checked: bool,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            parent: None,
            children: Vec::new(),
            display: Display::Unset,
            value: String::new(),
            checked: false,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attrs.get_attribute("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.attrs.get_attribute("name")
    }

    pub fn input_type(&self) -> InputType {
        self.attrs
            .get_attribute("type")
            .map(InputType::parse)
            .unwrap_or_default()
    }

    /// Whether `class` contains the given class name
    pub fn has_class(&self, class: &str) -> bool {
        self.attrs
            .get_attribute("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) -> Option<String> {
        self.attrs.set_attribute(name, value)
    }

    /// camelCase snapshot of the data-* attributes
    pub fn dataset(&self) -> DOMStringMap {
        DOMStringMap::from_attributes(&self.attrs)
    }

    /// Set a data-* attribute by camelCase key
    pub fn set_data(&mut self, key: &str, value: &str) -> Option<String> {
        self.attrs
            .set_attribute(&DOMStringMap::to_attribute_name(key), value)
    }

    /// Get a data-* attribute by camelCase key
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attrs.get_attribute(&DOMStringMap::to_attribute_name(key))
    }
}
