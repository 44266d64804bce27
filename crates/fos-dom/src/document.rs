//! Document - High-level document API
//!
//! Arena of elements with the lookups a script needs: by id, by name, by
//! simple selector.

use crate::element::{Element, InputType};
use crate::events::{Event, HandlerId, ListenerRegistry};
use crate::NodeId;

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

impl SimpleSelector {
    /// Parse a simple selector string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            Some(Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            Some(Self::Class(class.to_string()))
        } else {
            Some(Self::Tag(s.to_ascii_lowercase()))
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(tag) => element.tag == *tag,
            Self::Class(class) => element.has_class(class),
            Self::Id(id) => element.id() == Some(id.as_str()),
        }
    }
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
    body: NodeId,
    listeners: ListenerRegistry,
}

impl Document {
    /// Create a document holding an empty `<body>`
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new("body")],
            body: NodeId(0),
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.elements.len() as u32);
        self.elements.push(Element::new(tag));
        id
    }

    /// Append `child` to `parent`, detaching it from any previous parent
    ///
    /// Refused when `parent` lies inside `child`'s subtree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.get(parent).is_none() || self.get(child).is_none() || self.contains(child, parent) {
            return false;
        }
        if let Some(old) = self.elements[child.index()].parent {
            self.elements[old.index()].children.retain(|&c| c != child);
        }
        self.elements[child.index()].parent = Some(parent);
        self.elements[parent.index()].children.push(child);
        true
    }

    /// Create an element with attributes and append it in one step
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        if let Some(el) = self.get_mut(id) {
            for (name, value) in attrs {
                el.set_attribute(name, value);
            }
        }
        self.append_child(parent, id);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(id.index())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|el| el.parent)
    }

    /// Whether `node` is `ancestor` or one of its descendants
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Elements under `root` in document order, `root` included
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(el) = self.get(id) else { continue };
            out.push(id);
            stack.extend(el.children.iter().rev().copied());
        }
        out
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_selector(&format!("#{id}"))
    }

    /// Elements whose `name` attribute equals `name`, in document order
    pub fn get_elements_by_name(&self, name: &str) -> Vec<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .filter(|&id| self.get(id).and_then(Element::name) == Some(name))
            .collect()
    }

    /// Named controls of a form, in document order
    pub fn form_controls(&self, form: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(form)
            .into_iter()
            .filter(|&id| id != form && self.get(id).and_then(Element::name) == Some(name))
            .collect()
    }

    /// First match for a simple selector
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// All matches for a simple selector
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = SimpleSelector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(self.body)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(|el| selector.matches(el)))
            .collect()
    }

    /// Value of the checked radio in a group, or empty when none is checked
    pub fn radio_group_value(&self, radios: &[NodeId]) -> String {
        radios
            .iter()
            .filter_map(|&id| self.get(id))
            .find(|el| el.input_type() == InputType::Radio && el.checked)
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    /// Check a radio and uncheck the rest of its named group
    pub fn check_radio(&mut self, radio: NodeId) -> bool {
        let Some(name) = self.get(radio).and_then(Element::name).map(str::to_string) else {
            return false;
        };
        for id in self.get_elements_by_name(&name) {
            if let Some(el) = self.get_mut(id) {
                el.checked = id == radio;
            }
        }
        true
    }

    /// Listeners an event reaches: the target first, then ancestors for bubbling types
    pub fn dispatch_path(&self, event: &Event) -> Vec<(NodeId, HandlerId)> {
        let mut path = Vec::new();
        let mut current = Some(event.target);
        while let Some(id) = current {
            path.extend(
                self.listeners
                    .get_handlers(id, event.event_type)
                    .iter()
                    .map(|&handler| (id, handler)),
            );
            if !event.event_type.bubbles() {
                break;
            }
            current = self.parent(id);
        }
        path
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    /// Number of elements in the document
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
