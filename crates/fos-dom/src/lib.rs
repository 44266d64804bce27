//! fOS DOM - Document Object Model
//!
//! Headless element arena for driving page scripts without a renderer.

mod attributes;
mod dataset;
mod document;
mod element;
mod events;

pub use attributes::{Attr, NamedNodeMap};
pub use dataset::DOMStringMap;
pub use document::{Document, SimpleSelector};
pub use element::{Display, Element, InputType};
pub use events::{Event, EventType, HandlerId, ListenerRegistry};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
