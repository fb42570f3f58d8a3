//! Record access for validators.
//!
//! Validators never own a record. They borrow one through [`RecordAccess`]
//! for the duration of a single call, read the field value, and push side
//! effects (new value, error and info annotations) through [`RecordWrite`].
//!
//! Two adapters are provided:
//! - [`Record`]: a linked record that supports every write capability.
//! - [`DetachedRecord`]: a raw value snapshot; all writes are suppressed.

pub mod detached;
pub mod io;
pub mod linked;

use serde_json::Value;

pub use detached::DetachedRecord;
pub use io::{RecordBatch, RecordFormat, RecordIoError, load_records, save_records};
pub use linked::{Field, Record};

/// Read side of a record. Every adapter supports this.
pub trait RecordAccess {
    /// Read the stored value for `field`.
    fn get(&self, field: &str) -> Option<&Value>;

    /// Write capabilities, if this adapter has them.
    ///
    /// `None` puts the calling validator in reduced capability mode: the
    /// value is still read and judged, but nothing is written back.
    fn writer(&mut self) -> Option<&mut dyn RecordWrite>;
}

/// Write side of a linked record.
pub trait RecordWrite {
    /// Overwrite the stored value of `field`.
    fn set(&mut self, field: &str, value: Value);

    /// Append a validation failure annotation to `field`.
    fn add_error(&mut self, field: &str, message: &str);

    /// Append an informational annotation to `field`.
    fn add_info(&mut self, field: &str, message: &str);
}

/// Coerce a stored value to text.
///
/// Null, empty strings and non-scalar values yield `None`.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Field value as read at the start of a validator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldRead {
    pub text: Option<String>,
}

impl FieldRead {
    pub(crate) fn from_record(record: &dyn RecordAccess, field: &str) -> Self {
        Self { text: record.get(field).and_then(value_text) }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_none()
    }

    pub(crate) fn as_str(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Side-effect sink for a single validator call.
///
/// Wraps the optional writer so call sites don't have to repeat the
/// capability check for every write.
pub(crate) struct Effects<'a> {
    writer: Option<&'a mut dyn RecordWrite>,
    field: &'a str,
}

impl<'a> Effects<'a> {
    pub(crate) fn new(record: &'a mut dyn RecordAccess, field: &'a str) -> Self {
        let writer = record.writer();
        if writer.is_none() {
            tracing::trace!(field, "record is detached, writes suppressed");
        }
        Self { writer, field }
    }

    pub(crate) fn set(&mut self, value: impl Into<Value>) {
        if let Some(w) = self.writer.as_deref_mut() {
            w.set(self.field, value.into());
        }
    }

    pub(crate) fn add_error(&mut self, message: &str) {
        if let Some(w) = self.writer.as_deref_mut() {
            w.add_error(self.field, message);
        }
    }

    pub(crate) fn add_info(&mut self, message: &str) {
        if let Some(w) = self.writer.as_deref_mut() {
            w.add_info(self.field, message);
        }
    }
}
