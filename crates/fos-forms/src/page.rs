//! Reservation Page
//!
//! Owns the document, the bindings and the controller, registers the page's
//! listeners once, and routes dispatched events to the controller.

use std::collections::HashMap;

use fos_dom::{Document, Event, EventType, HandlerId, InputType, NodeId};
use tracing::{debug, info};

use crate::dom::{DomView, FormBindings, CONFIRMATION_BODY_ID, FORM_ID, MODAL_BODY_ID};
use crate::{Field, FieldKind, FormConfig, FormController, FormSnapshot, ModalState, Result, Submission};

/// Tournament cities offered by the location radio group
pub const LOCATIONS: [&str; 6] = [
    "New York",
    "San Francisco",
    "Seattle",
    "Chicago",
    "Boston",
    "Portland",
];

const HANDLER_OPEN: HandlerId = HandlerId(1);
const HANDLER_CLOSE: HandlerId = HandlerId(2);
const HANDLER_CLOSE_ON_ENTER: HandlerId = HandlerId(3);
const HANDLER_SUBMIT: HandlerId = HandlerId(4);
const HANDLER_FIELD: HandlerId = HandlerId(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Open,
    Close,
    CloseOnEnter,
    Submit,
    Field,
}

/// A reservation page running in a headless document
#[derive(Debug)]
pub struct ReservePage {
    document: Document,
    bindings: FormBindings,
    controller: FormController,
    actions: HashMap<HandlerId, Action>,
    last_submission: Option<Submission>,
}

impl ReservePage {
    /// Bind to an existing document and wire its listeners
    pub fn new(document: Document, config: &FormConfig) -> Result<Self> {
        Self::with_controller(document, FormController::new(config), config.realtime)
    }

    /// Same as [`ReservePage::new`] with a caller-built controller
    pub fn with_controller(document: Document, mut controller: FormController, realtime: bool) -> Result<Self> {
        let bindings = FormBindings::from_document(&document)?;
        if realtime {
            controller.check_form_realtime();
        }

        let mut page = Self {
            document,
            bindings,
            controller,
            actions: HashMap::from([
                (HANDLER_OPEN, Action::Open),
                (HANDLER_CLOSE, Action::Close),
                (HANDLER_CLOSE_ON_ENTER, Action::CloseOnEnter),
                (HANDLER_SUBMIT, Action::Submit),
                (HANDLER_FIELD, Action::Field),
            ]),
            last_submission: None,
        };
        page.wire();
        Ok(page)
    }

    /// The reference reservation page
    pub fn standard(config: &FormConfig) -> Result<Self> {
        Self::new(build_reservation_document(), config)
    }

    /// Register every listener; running it again adds nothing
    pub fn wire(&mut self) {
        let doc = &mut self.document;
        let mut bindings: Vec<(NodeId, EventType, HandlerId)> = Vec::new();

        bindings.extend(
            doc.query_selector_all(".modal-btn")
                .into_iter()
                .map(|btn| (btn, EventType::Click, HANDLER_OPEN)),
        );
        if let Some(top) = doc.get_element_by_id("btn-close-top") {
            bindings.push((top, EventType::Click, HANDLER_CLOSE));
            bindings.push((top, EventType::KeyPress, HANDLER_CLOSE_ON_ENTER));
        }
        if let Some(close) = doc.get_element_by_id("btn-close") {
            bindings.push((close, EventType::Click, HANDLER_CLOSE));
        }
        bindings.push((self.bindings.form, EventType::Submit, HANDLER_SUBMIT));

        for (field, control) in self.bindings.controls() {
            if !field.is_validated() {
                continue;
            }
            bindings.push((control, field.clear_trigger(), HANDLER_FIELD));
            if field.kind() == FieldKind::Text {
                bindings.push((control, EventType::KeyUp, HANDLER_FIELD));
            }
        }

        let added = bindings
            .into_iter()
            .filter(|&(node, event_type, handler)| {
                doc.listeners_mut().add_listener(node, event_type, handler)
            })
            .count();
        debug!(added, total = doc.listeners().len(), "page listeners wired");
    }

    /// Deliver an event to the listeners on its path
    pub fn dispatch(&mut self, event: &mut Event) {
        for (_, handler) in self.document.dispatch_path(event) {
            let Some(&action) = self.actions.get(&handler) else {
                continue;
            };
            let mut view = DomView::new(&mut self.document, &self.bindings);
            match action {
                Action::Open => self.controller.open(&mut view),
                Action::Close => self.controller.close(&mut view),
                Action::CloseOnEnter => {
                    if event.key.as_deref() == Some("Enter") {
                        self.controller.close(&mut view);
                    }
                }
                Action::Submit => {
                    event.prevent_default();
                    self.last_submission = Some(self.controller.check_form(&mut view));
                }
                Action::Field => {
                    if let Some(field) = self.bindings.field_for_control(event.target) {
                        self.controller.handle_event(&mut view, field, event.event_type);
                    }
                }
            }
        }
    }

    // -- user interactions --

    /// Click the first "reserve" button
    pub fn click_open(&mut self) {
        if let Some(btn) = self.document.query_selector(".modal-btn") {
            self.dispatch(&mut Event::new(EventType::Click, btn));
        }
    }

    /// Click the close cross
    pub fn click_close(&mut self) {
        if let Some(top) = self.document.get_element_by_id("btn-close-top") {
            self.dispatch(&mut Event::new(EventType::Click, top));
        }
    }

    /// Focus a field's first control
    pub fn focus(&mut self, field: Field) {
        if let Some(control) = self.first_control(field) {
            self.dispatch(&mut Event::new(EventType::Focus, control));
        }
    }

    /// Replace a text field's value, one key-up per character
    pub fn type_text(&mut self, field: Field, text: &str) {
        let Some(control) = self.first_control(field) else {
            return;
        };
        if let Some(el) = self.document.get_mut(control) {
            el.value.clear();
        }
        for c in text.chars() {
            if let Some(el) = self.document.get_mut(control) {
                el.value.push(c);
            }
            self.dispatch(&mut Event::key(EventType::KeyUp, control, &c.to_string()));
        }
    }

    /// Check the radio with the given value
    pub fn select_location(&mut self, value: &str) -> bool {
        let Some(binding) = self.bindings.field(Field::Location) else {
            return false;
        };
        let radio = binding
            .controls
            .iter()
            .copied()
            .find(|&id| self.document.get(id).is_some_and(|el| el.value == value));
        let Some(radio) = radio else {
            return false;
        };
        self.document.check_radio(radio);
        self.dispatch(&mut Event::new(EventType::Change, radio));
        true
    }

    /// Set a checkbox and fire its change event
    pub fn set_checked(&mut self, field: Field, checked: bool) {
        let Some(control) = self.first_control(field) else {
            return;
        };
        if let Some(el) = self.document.get_mut(control) {
            el.checked = checked;
        }
        self.dispatch(&mut Event::new(EventType::Change, control));
    }

    /// Enter every value of a snapshot the way a user would
    pub fn fill(&mut self, snapshot: &FormSnapshot) {
        for field in Field::TEXT {
            self.type_text(field, snapshot.text(field).unwrap_or_default());
        }
        if let Some(location) = snapshot.location.as_deref() {
            self.select_location(location);
        }
        self.set_checked(Field::Tos, snapshot.tos);
        self.set_checked(Field::Spam, snapshot.spam);
    }

    /// Submit the form and return the controller's verdict
    pub fn submit(&mut self) -> Option<&Submission> {
        let mut event = Event::new(EventType::Submit, self.bindings.form);
        self.dispatch(&mut event);
        if let Some(submission) = &self.last_submission {
            info!(passed = submission.passed(), "form submitted");
        }
        self.last_submission.as_ref()
    }

    // -- observation --

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn bindings(&self) -> &FormBindings {
        &self.bindings
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn modal_state(&self) -> ModalState {
        self.controller.modal_state()
    }

    pub fn last_submission(&self) -> Option<&Submission> {
        self.last_submission.as_ref()
    }

    /// `data-error` and `data-error-visible` of a field's container
    pub fn annotation(&self, field: Field) -> (Option<&str>, bool) {
        let Some(el) = self
            .bindings
            .field(field)
            .and_then(|b| self.document.get(b.container))
        else {
            return (None, false);
        };
        (el.data("error"), el.data("errorVisible") == Some("true"))
    }

    fn first_control(&self, field: Field) -> Option<NodeId> {
        self.bindings
            .field(field)
            .and_then(|b| b.controls.first().copied())
    }
}

/// Build the reservation page markup
///
/// ```text
/// body
/// ├── button.modal-btn
/// └── div.bground
///     └── div.content
///         ├── span#btn-close-top
///         ├── div#modal-body[data-show=true] > form#reserve-form > div.formData ...
///         └── div#validation-body[data-show=false] > button#btn-close
/// ```
pub fn build_reservation_document() -> Document {
    let mut doc = Document::new();
    let body = doc.body();

    doc.append_element(body, "button", &[("class", "btn-signup modal-btn")]);
    let overlay = doc.append_element(body, "div", &[("class", "bground")]);
    if let Some(el) = doc.get_mut(overlay) {
        el.display = fos_dom::Display::None;
    }
    let content = doc.append_element(overlay, "div", &[("class", "content")]);
    doc.append_element(content, "span", &[("id", "btn-close-top"), ("class", "close")]);

    let modal_body = doc.append_element(
        content,
        "div",
        &[("id", MODAL_BODY_ID), ("class", "modal-body"), ("data-show", "true")],
    );
    let form = doc.append_element(modal_body, "form", &[("id", FORM_ID), ("name", "reserve")]);

    let text_inputs = [
        (Field::FirstName, InputType::Text),
        (Field::LastName, InputType::Text),
        (Field::Email, InputType::Email),
        (Field::BirthDate, InputType::Date),
        (Field::Quantity, InputType::Number),
    ];
    for (field, input_type) in text_inputs {
        let container = doc.append_element(form, "div", &[("class", "formData")]);
        doc.append_element(
            container,
            "input",
            &[("type", input_type.as_str()), ("name", field.name()), ("id", field.name())],
        );
    }

    let radios = doc.append_element(form, "div", &[("class", "formData")]);
    for (i, city) in LOCATIONS.iter().enumerate() {
        let id = format!("location{}", i + 1);
        let radio = doc.append_element(
            radios,
            "input",
            &[("type", "radio"), ("name", Field::Location.name()), ("id", id.as_str())],
        );
        if let Some(el) = doc.get_mut(radio) {
            el.value = city.to_string();
        }
    }

    for field in [Field::Tos, Field::Spam] {
        let container = doc.append_element(form, "div", &[("class", "formData")]);
        doc.append_element(
            container,
            "input",
            &[("type", "checkbox"), ("name", field.name()), ("id", field.name())],
        );
    }
    doc.append_element(form, "input", &[("type", "submit"), ("class", "btn-submit")]);

    let confirmation = doc.append_element(
        content,
        "div",
        &[("id", CONFIRMATION_BODY_ID), ("data-show", "false")],
    );
    doc.append_element(confirmation, "button", &[("id", "btn-close"), ("class", "btn-submit")]);

    doc
}
