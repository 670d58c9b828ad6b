//! Text input state with valid/invalid feedback.

use serde::Serialize;

/// Visual feedback for a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldFeedback {
    /// The user hasn't typed yet, so no indicator is shown.
    Pristine,
    Valid,
    Invalid,
}

/// A text input that remembers whether the user has edited it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    changed: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value, as an `onChange` would.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.changed = true;
        self.value = value.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Feedback for the current value. Pristine until the first edit, even if the
    /// empty value is invalid.
    pub fn feedback(&self, is_valid: impl Fn(&str) -> bool) -> FieldFeedback {
        if !self.changed {
            FieldFeedback::Pristine
        } else if is_valid(&self.value) {
            FieldFeedback::Valid
        } else {
            FieldFeedback::Invalid
        }
    }
}
