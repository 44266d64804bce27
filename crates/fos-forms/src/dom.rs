//! DOM adapter
//!
//! Resolves the reservation page's elements once and implements the view
//! seams over an `fos_dom::Document`. Error state lives on each control's
//! container as `data-error` / `data-error-visible`; the modal is the
//! `.bground` overlay's inline display plus `data-show` on its two bodies.

use std::collections::BTreeMap;

use fos_dom::{Display, Document, NodeId};

use crate::view::{FormView, ModalView, SubView};
use crate::{Field, FieldKind, FormError, Result};

pub const FORM_ID: &str = "reserve-form";
pub const OVERLAY_SELECTOR: &str = ".bground";
pub const MODAL_BODY_ID: &str = "modal-body";
pub const CONFIRMATION_BODY_ID: &str = "validation-body";

/// Controls of one field and the container carrying its annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub controls: Vec<NodeId>,
    /// Parent of the first control
    pub container: NodeId,
}

/// Element references the controller's views need
#[derive(Debug, Clone)]
pub struct FormBindings {
    pub form: NodeId,
    pub overlay: NodeId,
    pub modal_body: NodeId,
    pub confirmation_body: NodeId,
    fields: BTreeMap<Field, FieldBinding>,
}

impl FormBindings {
    /// Look every element up; validated fields and modal containers are required
    pub fn from_document(doc: &Document) -> Result<Self> {
        let by_id = |id: &str| {
            doc.get_element_by_id(id)
                .ok_or_else(|| FormError::MissingElement(format!("#{id}")))
        };

        let form = by_id(FORM_ID)?;
        let overlay = doc
            .query_selector(OVERLAY_SELECTOR)
            .ok_or_else(|| FormError::MissingElement(OVERLAY_SELECTOR.to_string()))?;
        let modal_body = by_id(MODAL_BODY_ID)?;
        let confirmation_body = by_id(CONFIRMATION_BODY_ID)?;

        let mut fields = BTreeMap::new();
        for field in Field::ALL {
            let controls = doc.form_controls(form, field.name());
            let Some(&first) = controls.first() else {
                if field.is_validated() {
                    return Err(FormError::MissingElement(format!("[name={}]", field.name())));
                }
                continue;
            };
            let container = doc
                .parent(first)
                .ok_or_else(|| FormError::MissingElement(format!("[name={}] container", field.name())))?;
            fields.insert(field, FieldBinding { controls, container });
        }

        Ok(Self {
            form,
            overlay,
            modal_body,
            confirmation_body,
            fields,
        })
    }

    pub fn field(&self, field: Field) -> Option<&FieldBinding> {
        self.fields.get(&field)
    }

    /// Field owning a control element
    pub fn field_for_control(&self, node: NodeId) -> Option<Field> {
        self.fields
            .iter()
            .find(|(_, binding)| binding.controls.contains(&node))
            .map(|(&field, _)| field)
    }

    pub fn controls(&self) -> impl Iterator<Item = (Field, NodeId)> + '_ {
        self.fields
            .iter()
            .flat_map(|(&field, binding)| binding.controls.iter().map(move |&node| (field, node)))
    }
}

/// [`FormView`] and [`ModalView`] over a document
#[derive(Debug)]
pub struct DomView<'a> {
    doc: &'a mut Document,
    bindings: &'a FormBindings,
}

impl<'a> DomView<'a> {
    pub fn new(doc: &'a mut Document, bindings: &'a FormBindings) -> Self {
        Self { doc, bindings }
    }

    fn first_control(&self, field: Field) -> Option<NodeId> {
        self.bindings
            .field(field)
            .and_then(|b| b.controls.first().copied())
    }

    fn set_container_data(&mut self, field: Field, key: &str, value: &str) {
        let Some(container) = self.bindings.field(field).map(|b| b.container) else {
            return;
        };
        if let Some(el) = self.doc.get_mut(container) {
            el.set_data(key, value);
        }
    }

    fn set_show(&mut self, node: NodeId, shown: bool) {
        if let Some(el) = self.doc.get_mut(node) {
            el.set_data("show", bool_attr(shown));
        }
    }
}

impl FormView for DomView<'_> {
    fn text_value(&self, field: Field) -> String {
        self.first_control(field)
            .and_then(|id| self.doc.get(id))
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    fn selected_value(&self, field: Field) -> Option<String> {
        let binding = self.bindings.field(field)?;
        let value = self.doc.radio_group_value(&binding.controls);
        (!value.is_empty()).then_some(value)
    }

    fn is_checked(&self, field: Field) -> bool {
        debug_assert_eq!(field.kind(), FieldKind::Checkbox);
        self.first_control(field)
            .and_then(|id| self.doc.get(id))
            .is_some_and(|el| el.checked)
    }

    fn show_error(&mut self, field: Field, message: &str) {
        self.set_container_data(field, "error", message);
        self.set_container_data(field, "errorVisible", bool_attr(true));
    }

    fn set_error_visible(&mut self, field: Field, visible: bool) {
        self.set_container_data(field, "errorVisible", bool_attr(visible));
    }
}

impl ModalView for DomView<'_> {
    fn set_overlay_visible(&mut self, visible: bool) {
        if let Some(el) = self.doc.get_mut(self.bindings.overlay) {
            el.display = if visible { Display::Block } else { Display::None };
        }
    }

    fn show_sub_view(&mut self, sub_view: SubView) {
        let confirmation = sub_view == SubView::Confirmation;
        self.set_show(self.bindings.modal_body, !confirmation);
        self.set_show(self.bindings.confirmation_body, confirmation);
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
