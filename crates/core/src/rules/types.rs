use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::options::ValidationOptions;

/// Validator family a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Date,
    String,
    Number,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::String => "string",
            Self::Number => "number",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule as written in a config file.
///
/// ```toml
/// [[profiles.default.rules]]
/// field = "dob"
/// type = "date"
/// check = "before"
/// args = ["now"]
/// format = "mm/dd/yyyy"
/// options = { addInfo = true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub check: String,
    #[serde(default)]
    pub args: Vec<Value>,
    /// Date format specification, or fractional digits for numbers.
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub options: ValidationOptions,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule {index}: field name is empty")]
    EmptyField { index: usize },

    #[error("rule {index} ({field}): unknown {field_type} check '{check}'")]
    UnknownCheck { index: usize, field: String, field_type: FieldType, check: String },

    #[error("rule {index} ({field}): number format must be a digit count, got '{format}'")]
    BadPrecision { index: usize, field: String, format: String },
}
