//! Form snapshot, validation result and reservation record

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validators::{self, parse_int, parse_timestamp};
use crate::view::FormView;
use crate::{Field, FieldKind, FormError, Result};

/// Raw values of every field, read fresh for each check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormSnapshot {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: String,
    pub quantity: String,
    pub location: Option<String>,
    pub tos: bool,
    pub spam: bool,
}

impl FormSnapshot {
    /// Read every field from the view
    pub fn capture(view: &impl FormView) -> Self {
        Self {
            first_name: view.text_value(Field::FirstName),
            last_name: view.text_value(Field::LastName),
            email: view.text_value(Field::Email),
            birth_date: view.text_value(Field::BirthDate),
            quantity: view.text_value(Field::Quantity),
            location: view.selected_value(Field::Location),
            tos: view.is_checked(Field::Tos),
            spam: view.is_checked(Field::Spam),
        }
    }

    /// Raw text of a text field
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => Some(&self.first_name),
            Field::LastName => Some(&self.last_name),
            Field::Email => Some(&self.email),
            Field::BirthDate => Some(&self.birth_date),
            Field::Quantity => Some(&self.quantity),
            Field::Location => self.location.as_deref(),
            Field::Tos | Field::Spam => None,
        }
    }

    /// Run every validator; nothing short-circuits
    pub fn validate(&self, now: DateTime<Utc>) -> ValidationResult {
        let outcomes = Field::VALIDATED
            .into_iter()
            .map(|field| {
                let passed = match field.kind() {
                    FieldKind::Text => validate_text(field, self.text(field).unwrap_or_default(), now),
                    FieldKind::Radio => validators::validate_location_field(self.location.as_deref()),
                    FieldKind::Checkbox => validators::validate_tos_field(self.tos),
                };
                (field, passed)
            })
            .collect();
        ValidationResult { outcomes }
    }
}

/// Run the validator of a single text field
pub fn validate_text(field: Field, value: &str, now: DateTime<Utc>) -> bool {
    match field {
        Field::FirstName | Field::LastName => validators::validate_name_field(value),
        Field::Email => validators::validate_email_field(value),
        Field::BirthDate => validators::validate_date_field(value, now),
        Field::Quantity => validators::validate_quantity_field(value),
        Field::Location | Field::Tos | Field::Spam => true,
    }
}

/// Per-field outcome of one validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    outcomes: BTreeMap<Field, bool>,
}

impl ValidationResult {
    /// Whether a field passed; unvalidated fields always pass
    pub fn passed(&self, field: Field) -> bool {
        self.outcomes.get(&field).copied().unwrap_or(true)
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.values().all(|&ok| ok)
    }

    /// Failing fields in form order
    pub fn failed(&self) -> impl Iterator<Item = Field> + '_ {
        self.outcomes
            .iter()
            .filter(|&(_, &ok)| !ok)
            .map(|(&field, _)| field)
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }
}

/// Cleaned values of an accepted reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Milliseconds since the Unix epoch, UTC
    pub birth_date: i64,
    pub quantity: i64,
    pub location: String,
    pub tos: bool,
    pub spam: bool,
}

impl ReservationRecord {
    /// Coerce a snapshot; fails on values the validators would have rejected
    pub(crate) fn from_snapshot(snapshot: &FormSnapshot) -> Result<Self> {
        let coercion = |field: Field, value: &str| FormError::Coercion {
            field,
            value: value.to_string(),
        };

        let birth_date = parse_timestamp(&snapshot.birth_date)
            .ok_or_else(|| coercion(Field::BirthDate, &snapshot.birth_date))?;
        let quantity =
            parse_int(&snapshot.quantity).ok_or_else(|| coercion(Field::Quantity, &snapshot.quantity))?;
        let location = snapshot
            .location
            .clone()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| coercion(Field::Location, ""))?;

        Ok(Self {
            first_name: snapshot.first_name.trim().to_string(),
            last_name: snapshot.last_name.trim().to_string(),
            email: snapshot.email.trim().to_string(),
            birth_date,
            quantity,
            location,
            tos: snapshot.tos,
            spam: snapshot.spam,
        })
    }
}
