//! fOS Forms - Reservation form
//!
//! Field validators, a form controller with inline error annotations, and the
//! modal that hosts the form. The controller talks to the page through the
//! [`FormView`] and [`ModalView`] seams; [`dom`] implements them over an
//! `fos_dom::Document` and [`page`] wires the page's events.

mod config;
mod controller;
pub mod dom;
mod field;
mod messages;
mod modal;
pub mod page;
mod snapshot;
pub mod validators;
mod view;

pub use config::FormConfig;
pub use controller::{Clock, FieldState, FormController, Submission};
pub use field::{Field, FieldKind};
pub use messages::{Locale, MessageTable};
pub use modal::{Modal, ModalState};
pub use snapshot::{FormSnapshot, ReservationRecord, ValidationResult, validate_text};
pub use view::{FormView, ModalView, SubView};

/// Form error
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Cannot coerce {field} value {value:?}")]
    Coercion { field: Field, value: String },
}

pub type Result<T> = std::result::Result<T, FormError>;
