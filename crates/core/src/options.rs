//! Behavioral toggles shared by every validator family.

use serde::{Deserialize, Serialize};

/// Options gating the side effects of a validator call.
///
/// Each option independently controls one side effect. Keys use the
/// camelCase names found in rule files (`addError`, `validateOnEmpty`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Write an error annotation when the verdict is false.
    pub add_error: bool,
    /// Validate an absent value instead of failing it silently.
    pub validate_on_empty: bool,
    /// Replaces the default error text.
    pub error_msg: Option<String>,
    /// Persist the formatted value back to the field.
    pub set_record: bool,
    /// Write an info annotation when formatting changes the value.
    pub add_info: bool,
    /// Replaces the default info text.
    pub info_msg: Option<String>,
    /// Run the formatting step even when the verdict was false.
    pub format_on_error: bool,
    /// Run the formatting step even when the value was absent.
    pub format_on_empty: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            add_error: true,
            validate_on_empty: false,
            error_msg: None,
            set_record: true,
            add_info: false,
            info_msg: None,
            format_on_error: false,
            format_on_empty: false,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(mut self, yes: bool) -> Self {
        self.add_error = yes;
        self
    }

    pub fn validate_on_empty(mut self, yes: bool) -> Self {
        self.validate_on_empty = yes;
        self
    }

    pub fn error_msg(mut self, msg: impl Into<String>) -> Self {
        self.error_msg = Some(msg.into());
        self
    }

    pub fn set_record(mut self, yes: bool) -> Self {
        self.set_record = yes;
        self
    }

    pub fn add_info(mut self, yes: bool) -> Self {
        self.add_info = yes;
        self
    }

    pub fn info_msg(mut self, msg: impl Into<String>) -> Self {
        self.info_msg = Some(msg.into());
        self
    }

    pub fn format_on_error(mut self, yes: bool) -> Self {
        self.format_on_error = yes;
        self
    }

    pub fn format_on_empty(mut self, yes: bool) -> Self {
        self.format_on_empty = yes;
        self
    }

    /// Error text: the override if set, otherwise the validator's default.
    pub(crate) fn error_text(&self, default: impl FnOnce() -> String) -> String {
        self.error_msg.clone().unwrap_or_else(default)
    }

    /// Info text: the override if set, otherwise the validator's default.
    pub(crate) fn info_text(&self, default: impl FnOnce() -> String) -> String {
        self.info_msg.clone().unwrap_or_else(default)
    }
}
