//! Reservation Modal
//!
//! Overlay with two mutually exclusive sub-views.
//!
//! ```text
//! Closed ⇄ OpenShowingForm → OpenShowingConfirmation → (close) → Closed
//! ```
//!
//! A passing submission may also move Closed straight to the confirmation.

use tracing::debug;

use crate::view::{ModalView, SubView};

/// Modal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    OpenShowingForm,
    OpenShowingConfirmation,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        *self != ModalState::Closed
    }
}

/// Modal state machine, mirrored onto a [`ModalView`]
#[derive(Debug, Default)]
pub struct Modal {
    state: ModalState,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Show the overlay, always starting on the form
    pub fn open(&mut self, view: &mut impl ModalView) {
        view.set_overlay_visible(true);
        view.show_sub_view(SubView::Form);
        self.transition(ModalState::OpenShowingForm);
    }

    /// Hide the overlay and reset to the form so reopening starts fresh
    pub fn close(&mut self, view: &mut impl ModalView) {
        view.set_overlay_visible(false);
        view.show_sub_view(SubView::Form);
        self.transition(ModalState::Closed);
    }

    /// Switch to the confirmation; only reachable from a passing submission
    pub(crate) fn show_confirmation(&mut self, view: &mut impl ModalView) {
        if !self.state.is_open() {
            view.set_overlay_visible(true);
        }
        view.show_sub_view(SubView::Confirmation);
        self.transition(ModalState::OpenShowingConfirmation);
    }

    /// Switch back to the form; no-op while closed
    pub fn show_form(&mut self, view: &mut impl ModalView) -> bool {
        if !self.state.is_open() {
            return false;
        }
        view.show_sub_view(SubView::Form);
        self.transition(ModalState::OpenShowingForm);
        true
    }

    fn transition(&mut self, to: ModalState) {
        if self.state != to {
            debug!(from = ?self.state, ?to, "modal transition");
        }
        self.state = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Overlay {
        visible: bool,
        sub_view: Option<SubView>,
    }

    impl ModalView for Overlay {
        fn set_overlay_visible(&mut self, visible: bool) {
            self.visible = visible;
        }

        fn show_sub_view(&mut self, sub_view: SubView) {
            self.sub_view = Some(sub_view);
        }
    }

    #[test]
    fn test_open_close_cycle() {
        let mut modal = Modal::new();
        let mut view = Overlay::default();

        modal.open(&mut view);
        assert_eq!(modal.state(), ModalState::OpenShowingForm);
        assert!(view.visible);
        assert_eq!(view.sub_view, Some(SubView::Form));

        modal.show_confirmation(&mut view);
        assert_eq!(modal.state(), ModalState::OpenShowingConfirmation);
        assert_eq!(view.sub_view, Some(SubView::Confirmation));

        modal.close(&mut view);
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!view.visible);
        assert_eq!(view.sub_view, Some(SubView::Form));
    }

    #[test]
    fn test_confirmation_from_closed_shows_overlay() {
        let mut modal = Modal::new();
        let mut view = Overlay::default();

        modal.show_confirmation(&mut view);
        assert_eq!(modal.state(), ModalState::OpenShowingConfirmation);
        assert!(view.visible);
        assert_eq!(view.sub_view, Some(SubView::Confirmation));

        modal.close(&mut view);
        assert_eq!(modal.state(), ModalState::Closed);
        assert_eq!(view.sub_view, Some(SubView::Form));
    }

    #[test]
    fn test_reopen_starts_on_form() {
        let mut modal = Modal::new();
        let mut view = Overlay::default();

        modal.open(&mut view);
        modal.show_confirmation(&mut view);
        modal.open(&mut view);
        assert_eq!(modal.state(), ModalState::OpenShowingForm);

        modal.close(&mut view);
        assert!(!modal.show_form(&mut view));
        assert_eq!(modal.state(), ModalState::Closed);
    }
}
