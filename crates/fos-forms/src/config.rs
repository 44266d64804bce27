//! Form Configuration
//!
//! Everything the controller used to read from page globals: the message
//! table and whether keystroke validation is on.

use std::collections::HashMap;

use serde::Deserialize;

use crate::messages::{Locale, MessageTable};
use crate::{Field, Result};

/// Reservation form configuration
///
/// ```json
/// { "locale": "en", "realtime": true, "messages": { "email": "Bad email" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub locale: Locale,
    /// Per-field overrides on top of the locale's messages
    pub messages: HashMap<Field, String>,
    /// Validate text fields on every keystroke
    pub realtime: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            messages: HashMap::new(),
            realtime: true,
        }
    }
}

impl FormConfig {
    /// Parse configuration from JSON; absent keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn with_message(mut self, field: Field, message: impl Into<String>) -> Self {
        self.messages.insert(field, message.into());
        self
    }

    /// Resolve the message table this configuration describes
    pub fn message_table(&self) -> MessageTable {
        let mut table = MessageTable::new(self.locale);
        for (&field, message) in &self.messages {
            table.set(field, message.clone());
        }
        table
    }
}
