//! View seams
//!
//! The controller never looks elements up itself. Whatever renders the form
//! hands it one of these per call.

use crate::Field;

/// Field values in, error annotations out
pub trait FormView {
    /// Current text of a text field
    fn text_value(&self, field: Field) -> String;

    /// Selected value of a radio group, `None` when nothing is selected
    fn selected_value(&self, field: Field) -> Option<String>;

    /// Checkedness of a checkbox
    fn is_checked(&self, field: Field) -> bool;

    /// Write the message and make the annotation visible
    fn show_error(&mut self, field: Field, message: &str);

    /// Toggle the annotation without touching its message
    fn set_error_visible(&mut self, field: Field, visible: bool);
}

/// Modal sub-view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubView {
    Form,
    Confirmation,
}

/// Overlay display and sub-view selection
pub trait ModalView {
    fn set_overlay_visible(&mut self, visible: bool);

    fn show_sub_view(&mut self, sub_view: SubView);
}
