use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::BookingField;

/// Inline errors raised by the booking details gate. Never fatal; the form stays editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("booking details incomplete: {fields:?}")]
pub struct ValidationErrors {
    pub fields: BTreeSet<BookingField>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: BookingField) {
        self.fields.insert(field);
    }

    pub fn clear(&mut self, field: BookingField) {
        self.fields.remove(&field);
    }

    pub fn contains(&self, field: BookingField) -> bool {
        self.fields.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn message_for(&self, field: BookingField) -> Option<&'static str> {
        self.contains(field).then(|| field.error_message())
    }
}

impl FromIterator<BookingField> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = BookingField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
