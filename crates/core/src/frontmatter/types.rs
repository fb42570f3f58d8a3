//! Frontmatter types and data structures.

use serde_yaml::{Mapping, Value};

use crate::record::Record;

/// Represents parsed YAML frontmatter from a markdown document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    /// Fields in document order.
    pub fields: Mapping,
}

impl Frontmatter {
    /// Convert string-keyed fields into a record.
    ///
    /// Non-string keys are skipped, as are values that cannot be expressed
    /// as JSON (e.g. tagged YAML nodes that fail to convert).
    pub fn to_record(&self) -> Record {
        let pairs = self.fields.iter().filter_map(|(k, v)| {
            let key = k.as_str()?;
            let value = serde_json::to_value(v).ok()?;
            Some((key.to_string(), value))
        });
        Record::from_pairs(pairs)
    }

    /// Write record values back into the frontmatter.
    ///
    /// Existing keys keep their position; new keys are appended.
    pub fn apply_record(&mut self, record: &Record) {
        for (name, field) in record.fields() {
            let Ok(value) = serde_yaml::to_value(&field.value) else {
                continue;
            };
            self.fields.insert(Value::String(name.to_string()), value);
        }
    }
}

/// Result of splitting frontmatter from markdown.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if present).
    pub frontmatter: Option<Frontmatter>,
    /// The markdown body (everything after frontmatter).
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordAccess, RecordWrite};
    use serde_json::json;

    #[test]
    fn to_record_and_back_preserves_order() {
        let mut fields = Mapping::new();
        fields.insert(Value::from("title"), Value::from("Intake"));
        fields.insert(Value::from("dob"), Value::from("1990-04-01"));
        let mut fm = Frontmatter { fields };

        let mut record = fm.to_record();
        assert_eq!(record.get("dob"), Some(&json!("1990-04-01")));

        record.set("dob", json!("04/01/1990"));
        record.set("checked", json!(true));
        fm.apply_record(&record);

        let keys: Vec<&str> = fm.fields.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, ["title", "dob", "checked"]);
        assert_eq!(fm.fields.get("dob").and_then(Value::as_str), Some("04/01/1990"));
    }
}
