//! Declarative rules: which check runs on which field.

pub mod engine;
pub mod types;

pub use engine::{Check, RecordReport, Rule, RuleOutcome, RuleSet};
pub use types::{FieldType, RuleConfig, RuleError};
