//! Localized error messages

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Field;

/// Message language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    /// Built-in message for a field; empty for fields that are never validated
    pub fn message(&self, field: Field) -> &'static str {
        match (self, field) {
            (Locale::Fr, Field::FirstName) => "Veuillez entrer 2 caractères ou plus pour le champ du prénom.",
            (Locale::Fr, Field::LastName) => "Veuillez entrer 2 caractères ou plus pour le champ du nom.",
            (Locale::Fr, Field::Email) => "Veuillez entrer une adresse email valide.",
            (Locale::Fr, Field::BirthDate) => "Veuillez entrer une date valide.",
            (Locale::Fr, Field::Quantity) => "Veuillez entrer un nombre entier valide.",
            (Locale::Fr, Field::Location) => "Veuillez sélectionner une option.",
            (Locale::Fr, Field::Tos) => "Veuillez cocher la case pour accepter les conditions d'utilisation.",
            (Locale::En, Field::FirstName) => "Please enter 2 or more characters for the first name field.",
            (Locale::En, Field::LastName) => "Please enter 2 or more characters for the last name field.",
            (Locale::En, Field::Email) => "Please enter a valid email address.",
            (Locale::En, Field::BirthDate) => "Please enter a valid date.",
            (Locale::En, Field::Quantity) => "Please enter a valid whole number.",
            (Locale::En, Field::Location) => "Please select an option.",
            (Locale::En, Field::Tos) => "Please check the box to accept the terms of use.",
            (_, Field::Spam) => "",
        }
    }
}

/// Per-field messages: a locale's built-ins plus overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    locale: Locale,
    overrides: HashMap<Field, String>,
}

impl MessageTable {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            overrides: HashMap::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Replace the message shown for a field
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.overrides.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> &str {
        self.overrides
            .get(&field)
            .map(String::as_str)
            .unwrap_or_else(|| self.locale.message(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_validated_field_has_a_message() {
        for locale in [Locale::Fr, Locale::En] {
            for field in Field::VALIDATED {
                assert!(!locale.message(field).is_empty(), "{locale:?} {field}");
            }
        }
    }

    #[test]
    fn test_override_wins() {
        let mut table = MessageTable::new(Locale::En);
        table.set(Field::Email, "Bad email");

        assert_eq!(table.get(Field::Email), "Bad email");
        assert_eq!(table.get(Field::Quantity), "Please enter a valid whole number.");
    }
}
