//! Linked record adapter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{RecordAccess, RecordWrite};

/// A single named field: its value plus accumulated annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub value: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub infos: Vec<String>,
}

impl Field {
    pub fn new(value: Value) -> Self {
        Self { value, errors: Vec::new(), infos: Vec::new() }
    }
}

/// An in-memory record with full read/write capabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(field, value)` pairs.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let fields =
            pairs.into_iter().map(|(k, v)| (k.into(), Field::new(v))).collect();
        Self { fields }
    }

    /// Build a record from a JSON object. Non-object values yield an empty record.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_pairs(map),
            _ => Self::default(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn errors(&self, name: &str) -> &[String] {
        self.fields.get(name).map_or(&[], |f| f.errors.as_slice())
    }

    pub fn infos(&self, name: &str) -> &[String] {
        self.fields.get(name).map_or(&[], |f| f.infos.as_slice())
    }

    /// True when no field carries an error annotation.
    pub fn is_clean(&self) -> bool {
        self.fields.values().all(|f| f.errors.is_empty())
    }

    /// Field values only, without annotations.
    pub fn to_values(&self) -> Map<String, Value> {
        self.fields.iter().map(|(k, f)| (k.clone(), f.value.clone())).collect()
    }
}

impl RecordAccess for Record {
    fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).map(|f| &f.value)
    }

    fn writer(&mut self) -> Option<&mut dyn RecordWrite> {
        Some(self)
    }
}

impl RecordWrite for Record {
    fn set(&mut self, field: &str, value: Value) {
        tracing::trace!(field, %value, "set field");
        self.fields.entry(field.to_string()).or_default().value = value;
    }

    fn add_error(&mut self, field: &str, message: &str) {
        self.fields.entry(field.to_string()).or_default().errors.push(message.to_string());
    }

    fn add_info(&mut self, field: &str, message: &str) {
        self.fields.entry(field.to_string()).or_default().infos.push(message.to_string());
    }
}
