//! Reservation Fields
//!
//! The named controls of the reservation form.

use fos_dom::EventType;
use serde::{Deserialize, Serialize};

/// Kind of control backing a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Named radio group, valued by its checked member
    Radio,
    Checkbox,
}

/// Reservation form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    BirthDate,
    Quantity,
    Location,
    Tos,
    /// Event notifications opt-in, carried into the record but never validated
    Spam,
}

impl Field {
    /// Every field, in form order
    pub const ALL: [Field; 8] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::BirthDate,
        Field::Quantity,
        Field::Location,
        Field::Tos,
        Field::Spam,
    ];

    /// Fields that must pass a validator before submission
    pub const VALIDATED: [Field; 7] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::BirthDate,
        Field::Quantity,
        Field::Location,
        Field::Tos,
    ];

    /// Text fields, the ones with keystroke validation
    pub const TEXT: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::BirthDate,
        Field::Quantity,
    ];

    /// Control name on the form
    pub fn name(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::BirthDate => "birthDate",
            Field::Quantity => "quantity",
            Field::Location => "location",
            Field::Tos => "tos",
            Field::Spam => "spam",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Location => FieldKind::Radio,
            Field::Tos | Field::Spam => FieldKind::Checkbox,
            _ => FieldKind::Text,
        }
    }

    pub fn is_validated(&self) -> bool {
        *self != Field::Spam
    }

    /// Interaction that hides a shown error: focus for text, change otherwise
    pub fn clear_trigger(&self) -> EventType {
        match self.kind() {
            FieldKind::Text => EventType::Focus,
            FieldKind::Radio | FieldKind::Checkbox => EventType::Change,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
