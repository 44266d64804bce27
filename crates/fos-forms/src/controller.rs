//! Form Controller
//!
//! Runs the validators across the form, keeps each field's annotation state,
//! and moves the modal to the confirmation on a passing submission.
//!
//! Interactions are routed through a subscription table built once: focus or
//! change hides an error that a submission armed, key-up re-validates a text
//! field when realtime validation is on. Failing twice never stacks listeners.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};
use fos_dom::EventType;
use tracing::{debug, info, warn};

use crate::config::FormConfig;
use crate::messages::MessageTable;
use crate::modal::{Modal, ModalState};
use crate::snapshot::{validate_text, FormSnapshot, ReservationRecord, ValidationResult};
use crate::view::{FormView, ModalView};
use crate::{Field, FieldKind};

/// Source of "now" for the birth date check
pub type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// Annotation state of one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    /// Last message written; kept when the annotation is hidden
    pub message: Option<String>,
    pub error_visible: bool,
    /// Next clearing interaction will hide the error
    armed: bool,
}

impl FieldState {
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    ClearError,
    Revalidate,
}

/// Outcome of a full-form check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub result: ValidationResult,
    /// Present only when every field passed
    pub record: Option<ReservationRecord>,
}

impl Submission {
    pub fn passed(&self) -> bool {
        self.record.is_some()
    }
}

/// Reservation form controller
pub struct FormController {
    messages: MessageTable,
    states: BTreeMap<Field, FieldState>,
    subscriptions: HashMap<(Field, EventType), Reaction>,
    modal: Modal,
    clock: Clock,
}

impl FormController {
    pub fn new(config: &FormConfig) -> Self {
        let subscriptions = Field::VALIDATED
            .into_iter()
            .map(|field| ((field, field.clear_trigger()), Reaction::ClearError))
            .collect();

        Self {
            messages: config.message_table(),
            states: Field::VALIDATED
                .into_iter()
                .map(|field| (field, FieldState::default()))
                .collect(),
            subscriptions,
            modal: Modal::new(),
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the clock used to reject future birth dates
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn field_state(&self, field: Field) -> Option<&FieldState> {
        self.states.get(&field)
    }

    /// Fields whose annotation is currently shown, with their message
    pub fn visible_errors(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.states
            .iter()
            .filter(|(_, state)| state.error_visible)
            .map(|(&field, state)| (field, state.message.as_deref().unwrap_or_default()))
    }

    pub fn modal_state(&self) -> ModalState {
        self.modal.state()
    }

    pub fn realtime_enabled(&self) -> bool {
        self.subscriptions
            .values()
            .any(|&reaction| reaction == Reaction::Revalidate)
    }

    pub fn open(&mut self, view: &mut impl ModalView) {
        self.modal.open(view);
    }

    pub fn close(&mut self, view: &mut impl ModalView) {
        self.modal.close(view);
    }

    /// Validate every field, annotate the failures, confirm on success
    pub fn check_form<V: FormView + ModalView>(&mut self, view: &mut V) -> Submission {
        let snapshot = FormSnapshot::capture(&*view);
        let result = snapshot.validate((self.clock)());

        for field in Field::VALIDATED {
            if result.passed(field) {
                self.hide_error(view, field);
            } else {
                let message = self.messages.get(field).to_string();
                debug!(%field, "field rejected");
                self.show_error(view, field, message, true);
            }
        }

        if !result.all_passed() {
            info!(failed = result.failed_count(), "reservation rejected");
            return Submission { result, record: None };
        }

        match ReservationRecord::from_snapshot(&snapshot) {
            Ok(record) => {
                self.modal.show_confirmation(view);
                info!(location = %record.location, quantity = record.quantity, "reservation accepted");
                Submission {
                    result,
                    record: Some(record),
                }
            }
            Err(err) => {
                warn!(%err, "validated snapshot could not be coerced");
                Submission { result, record: None }
            }
        }
    }

    /// Turn on keystroke validation for the text fields
    pub fn check_form_realtime(&mut self) {
        for field in Field::TEXT {
            self.subscriptions
                .insert((field, EventType::KeyUp), Reaction::Revalidate);
        }
    }

    /// Route an interaction on a field; returns whether anything reacted
    pub fn handle_event(&mut self, view: &mut impl FormView, field: Field, event: EventType) -> bool {
        match self.subscriptions.get(&(field, event)) {
            Some(Reaction::ClearError) => self.clear_armed(view, field),
            Some(Reaction::Revalidate) => {
                self.revalidate(view, field);
                true
            }
            None => false,
        }
    }

    fn clear_armed(&mut self, view: &mut impl FormView, field: Field) -> bool {
        let Some(state) = self.states.get_mut(&field) else {
            return false;
        };
        if !state.armed {
            return false;
        }
        state.armed = false;
        state.error_visible = false;
        view.set_error_visible(field, false);
        debug!(%field, "error cleared on interaction");
        true
    }

    fn revalidate(&mut self, view: &mut impl FormView, field: Field) {
        debug_assert_eq!(field.kind(), FieldKind::Text);
        let value = view.text_value(field);
        if validate_text(field, &value, (self.clock)()) {
            if let Some(state) = self.states.get_mut(&field) {
                state.armed = false;
                state.error_visible = false;
            }
            view.set_error_visible(field, false);
        } else {
            let message = self.messages.get(field).to_string();
            self.show_error(view, field, message, false);
        }
    }

    fn show_error(&mut self, view: &mut impl FormView, field: Field, message: String, arm: bool) {
        view.show_error(field, &message);
        let state = self.states.entry(field).or_default();
        state.message = Some(message);
        state.error_visible = true;
        state.armed |= arm;
    }

    fn hide_error(&mut self, view: &mut impl FormView, field: Field) {
        if let Some(state) = self.states.get_mut(&field) {
            if state.error_visible {
                state.error_visible = false;
                state.armed = false;
                view.set_error_visible(field, false);
            }
        }
    }
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("messages", &self.messages)
            .field("states", &self.states)
            .field("modal", &self.modal)
            .field("realtime", &self.realtime_enabled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::SubView;
    use chrono::TimeZone;

    /// In-memory form that records every write
    #[derive(Default)]
    struct RecordingView {
        snapshot: FormSnapshot,
        errors: HashMap<Field, (String, bool)>,
        writes: usize,
        overlay: bool,
        sub_views: Vec<SubView>,
    }

    impl RecordingView {
        fn valid() -> Self {
            Self {
                snapshot: FormSnapshot {
                    first_name: "Jeanne".into(),
                    last_name: "Martin".into(),
                    email: "jeanne@example.fr".into(),
                    birth_date: "1988-04-02".into(),
                    quantity: "2".into(),
                    location: Some("Portland".into()),
                    tos: true,
                    spam: true,
                },
                ..Default::default()
            }
        }

        fn visible(&self, field: Field) -> bool {
            self.errors.get(&field).is_some_and(|(_, visible)| *visible)
        }

        fn confirmations(&self) -> usize {
            self.sub_views
                .iter()
                .filter(|&&v| v == SubView::Confirmation)
                .count()
        }
    }

    impl FormView for RecordingView {
        fn text_value(&self, field: Field) -> String {
            self.snapshot.text(field).unwrap_or_default().to_string()
        }

        fn selected_value(&self, _field: Field) -> Option<String> {
            self.snapshot.location.clone()
        }

        fn is_checked(&self, field: Field) -> bool {
            match field {
                Field::Tos => self.snapshot.tos,
                Field::Spam => self.snapshot.spam,
                _ => false,
            }
        }

        fn show_error(&mut self, field: Field, message: &str) {
            self.writes += 1;
            self.errors.insert(field, (message.to_string(), true));
        }

        fn set_error_visible(&mut self, field: Field, visible: bool) {
            self.writes += 1;
            if let Some(entry) = self.errors.get_mut(&field) {
                entry.1 = visible;
            }
        }
    }

    impl ModalView for RecordingView {
        fn set_overlay_visible(&mut self, visible: bool) {
            self.overlay = visible;
        }

        fn show_sub_view(&mut self, sub_view: SubView) {
            self.sub_views.push(sub_view);
        }
    }

    fn controller() -> FormController {
        FormController::new(&FormConfig::default())
            .with_clock(|| Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_valid_submission_confirms_once() {
        let mut ctrl = controller();
        let mut view = RecordingView::valid();
        ctrl.open(&mut view);

        let submission = ctrl.check_form(&mut view);

        assert!(submission.passed());
        assert_eq!(view.confirmations(), 1);
        assert_eq!(ctrl.modal_state(), ModalState::OpenShowingConfirmation);
        assert!(view.errors.is_empty());

        let record = submission.record.unwrap();
        assert_eq!(record.quantity, 2);
        assert!(record.spam);
    }

    #[test]
    fn test_single_invalid_field() {
        let mut ctrl = controller();
        let mut view = RecordingView::valid();
        view.snapshot.email = "jeanne.example.fr".into();
        ctrl.open(&mut view);

        let submission = ctrl.check_form(&mut view);

        assert!(!submission.passed());
        assert_eq!(ctrl.modal_state(), ModalState::OpenShowingForm);
        assert_eq!(view.confirmations(), 0);
        assert_eq!(view.errors.len(), 1);
        assert_eq!(
            view.errors[&Field::Email].0,
            "Veuillez entrer une adresse email valide."
        );
    }

    #[test]
    fn test_every_failure_reported() {
        let mut ctrl = controller();
        let mut view = RecordingView::default();

        let submission = ctrl.check_form(&mut view);

        assert_eq!(submission.result.failed_count(), Field::VALIDATED.len());
        for field in Field::VALIDATED {
            assert!(view.visible(field), "{field} should be annotated");
            assert!(ctrl.field_state(field).unwrap().is_armed());
        }
        assert!(!view.errors.contains_key(&Field::Spam));
    }

    #[test]
    fn test_focus_clears_visibility_keeps_message() {
        let mut ctrl = controller();
        let mut view = RecordingView::valid();
        view.snapshot.first_name = "Al".into();
        ctrl.check_form(&mut view);

        assert!(ctrl.handle_event(&mut view, Field::FirstName, EventType::Focus));

        let state = ctrl.field_state(Field::FirstName).unwrap();
        assert!(!state.error_visible);
        assert!(state.message.is_some());
        assert!(!view.visible(Field::FirstName));
        assert!(view.errors.contains_key(&Field::FirstName));

        // one-shot: a second focus does nothing
        assert!(!ctrl.handle_event(&mut view, Field::FirstName, EventType::Focus));
    }

    #[test]
    fn test_change_clears_checkbox_but_focus_does_not() {
        let mut ctrl = controller();
        let mut view = RecordingView::valid();
        view.snapshot.tos = false;
        ctrl.check_form(&mut view);

        assert!(!ctrl.handle_event(&mut view, Field::Tos, EventType::Focus));
        assert!(view.visible(Field::Tos));
        assert!(ctrl.handle_event(&mut view, Field::Tos, EventType::Change));
        assert!(!view.visible(Field::Tos));
    }

    #[test]
    fn test_realtime_requires_enabling() {
        let mut ctrl = controller();
        let mut view = RecordingView::valid();
        view.snapshot.quantity = "1.5".into();

        assert!(!ctrl.handle_event(&mut view, Field::Quantity, EventType::KeyUp));
        assert!(!ctrl.realtime_enabled());

        ctrl.check_form_realtime();
        ctrl.check_form_realtime();
        assert!(ctrl.realtime_enabled());

        assert!(ctrl.handle_event(&mut view, Field::Quantity, EventType::KeyUp));
        assert!(view.visible(Field::Quantity));
        // keystroke failures do not arm the focus clear
        assert!(!ctrl.field_state(Field::Quantity).unwrap().is_armed());

        view.snapshot.quantity = "15".into();
        ctrl.handle_event(&mut view, Field::Quantity, EventType::KeyUp);
        assert!(!view.visible(Field::Quantity));
    }

    #[test]
    fn test_realtime_ignores_choice_fields() {
        let mut ctrl = controller();
        ctrl.check_form_realtime();
        let mut view = RecordingView::valid();

        assert!(!ctrl.handle_event(&mut view, Field::Location, EventType::KeyUp));
        assert_eq!(view.writes, 0);
    }

    #[test]
    fn test_resubmitting_valid_data_is_idempotent() {
        let mut ctrl = controller();
        let mut view = RecordingView::valid();
        ctrl.open(&mut view);

        let first = ctrl.check_form(&mut view);
        let second = ctrl.check_form(&mut view);

        assert!(first.passed() && second.passed());
        assert_eq!(first.record, second.record);
        assert_eq!(view.writes, 0);
        assert_eq!(ctrl.modal_state(), ModalState::OpenShowingConfirmation);
    }

    #[test]
    fn test_fixed_field_hidden_on_resubmit() {
        let mut ctrl = controller();
        let mut view = RecordingView::valid();
        ctrl.open(&mut view);
        view.snapshot.location = None;
        assert!(!ctrl.check_form(&mut view).passed());
        assert!(view.visible(Field::Location));

        view.snapshot.location = Some("Seattle".into());
        assert!(ctrl.check_form(&mut view).passed());
        assert!(!view.visible(Field::Location));
        assert_eq!(ctrl.visible_errors().count(), 0);
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let mut ctrl = controller();
        let mut view = RecordingView::valid();
        view.snapshot.birth_date = "2030-01-01".into();

        let submission = ctrl.check_form(&mut view);
        assert_eq!(submission.result.failed().collect::<Vec<_>>(), vec![Field::BirthDate]);
    }

    #[test]
    fn test_valid_submission_with_closed_modal() {
        let mut ctrl = controller();
        let mut view = RecordingView::valid();

        let submission = ctrl.check_form(&mut view);

        assert!(submission.passed());
        assert_eq!(ctrl.modal_state(), ModalState::OpenShowingConfirmation);
        assert_eq!(view.confirmations(), 1);
        assert!(view.overlay);
    }
}
