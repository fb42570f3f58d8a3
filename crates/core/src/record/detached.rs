//! Detached record adapter: a raw snapshot of stored values.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::{RecordAccess, RecordWrite};

/// Raw stored value, as exposed by `values[field].value`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawValue {
    #[serde(default)]
    pub value: Value,
}

/// Read-only view over a record's stored values.
///
/// Validators run against it in reduced capability mode: verdicts are
/// computed but no value or annotation is written.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DetachedRecord {
    pub values: BTreeMap<String, RawValue>,
}

impl DetachedRecord {
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let values =
            pairs.into_iter().map(|(k, value)| (k.into(), RawValue { value })).collect();
        Self { values }
    }
}

impl RecordAccess for DetachedRecord {
    fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field).map(|raw| &raw.value)
    }

    fn writer(&mut self) -> Option<&mut dyn RecordWrite> {
        None
    }
}
