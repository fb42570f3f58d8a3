//! Date validation and formatting.
//!
//! Values are resolved in two stages: relative expressions (`now`,
//! `now+5days`) through [`relative`], everything else through the free-text
//! parser in [`natural`]. Resolved dates render through the format
//! specification language in [`format`]. The validators in [`validators`]
//! tie these together against a borrowed record.
//!
//! # Example
//!
//! ```
//! use fieldcheck_core::dates::{self, DateCheck};
//! use fieldcheck_core::options::ValidationOptions;
//! use fieldcheck_core::record::{Record, RecordAccess};
//! use serde_json::json;
//!
//! let mut record = Record::from_pairs([("dob", json!("2024-03-15"))]);
//! let ok = dates::evaluate_and_format(
//!     &mut record,
//!     "dob",
//!     &DateCheck::Validate,
//!     Some("MM/DD/YYYY"),
//!     &ValidationOptions::default(),
//! );
//! assert!(ok);
//! assert_eq!(record.get("dob"), Some(&json!("03/15/2024")));
//! ```

pub mod format;
pub mod natural;
pub mod relative;
pub mod validators;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::value_text;

pub use format::{FormatSpec, render, render_or_iso};
pub use natural::{is_date, parse_date};
pub use relative::{RelativeDate, RelativeUnit, evaluate_relative, is_relative_expr};
pub use validators::{after, before, between, evaluate_and_format, format, validate};

/// Date validation kinds, by their stable discriminator strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateCheckKind {
    Validate,
    Before,
    After,
    Between,
}

impl DateCheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Before => "before",
            Self::After => "after",
            Self::Between => "between",
        }
    }
}

impl fmt::Display for DateCheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateCheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "validate" => Ok(Self::Validate),
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "between" => Ok(Self::Between),
            _ => Err(format!("unknown date check: {s}")),
        }
    }
}

/// A date check together with its comparison operands.
///
/// Operands are raw text: either a date the free-text parser understands
/// or a relative expression. `None` operands never resolve, so the
/// comparison fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCheck {
    Validate,
    Before(Option<String>),
    After(Option<String>),
    Between(Option<String>, Option<String>),
}

impl DateCheck {
    /// Build a check from a kind and positional arguments.
    ///
    /// `between` takes an ordered pair, given either as two arguments or as
    /// one two-element list. Any other shape degrades to missing operands.
    pub fn from_args(kind: DateCheckKind, args: &[Value]) -> Self {
        match kind {
            DateCheckKind::Validate => Self::Validate,
            DateCheckKind::Before => Self::Before(first_operand(kind, args)),
            DateCheckKind::After => Self::After(first_operand(kind, args)),
            DateCheckKind::Between => {
                let pair = match args {
                    [Value::Array(inner)] => inner.as_slice(),
                    other => other,
                };
                match pair {
                    [start, end] => Self::Between(value_text(start), value_text(end)),
                    _ => {
                        tracing::warn!(
                            count = pair.len(),
                            "between expects exactly two bounds, comparison will fail"
                        );
                        Self::Between(None, None)
                    }
                }
            }
        }
    }

    pub fn kind(&self) -> DateCheckKind {
        match self {
            Self::Validate => DateCheckKind::Validate,
            Self::Before(_) => DateCheckKind::Before,
            Self::After(_) => DateCheckKind::After,
            Self::Between(..) => DateCheckKind::Between,
        }
    }
}

fn first_operand(kind: DateCheckKind, args: &[Value]) -> Option<String> {
    let operand = args.first().and_then(value_text);
    if operand.is_none() {
        tracing::warn!(check = %kind, "missing comparison bound, comparison will fail");
    }
    operand
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_roundtrips_through_str() {
        for kind in [
            DateCheckKind::Validate,
            DateCheckKind::Before,
            DateCheckKind::After,
            DateCheckKind::Between,
        ] {
            assert_eq!(kind.as_str().parse::<DateCheckKind>(), Ok(kind));
        }
        assert!("Before".parse::<DateCheckKind>().is_err());
        assert!("isEmail".parse::<DateCheckKind>().is_err());
    }

    #[test]
    fn from_args_single_bound() {
        assert_eq!(
            DateCheck::from_args(DateCheckKind::Before, &[json!("now")]),
            DateCheck::Before(Some("now".into()))
        );
        assert_eq!(DateCheck::from_args(DateCheckKind::After, &[]), DateCheck::After(None));
        assert_eq!(
            DateCheck::from_args(DateCheckKind::Validate, &[json!("ignored")]),
            DateCheck::Validate
        );
    }

    #[test]
    fn from_args_between_pair_shapes() {
        let expected =
            DateCheck::Between(Some("2024-01-01".into()), Some("2024-12-31".into()));
        assert_eq!(
            DateCheck::from_args(
                DateCheckKind::Between,
                &[json!("2024-01-01"), json!("2024-12-31")]
            ),
            expected
        );
        assert_eq!(
            DateCheck::from_args(
                DateCheckKind::Between,
                &[json!(["2024-01-01", "2024-12-31"])]
            ),
            expected
        );
    }

    #[test]
    fn from_args_between_malformed_degrades_to_none() {
        assert_eq!(
            DateCheck::from_args(DateCheckKind::Between, &[json!("2024-01-01")]),
            DateCheck::Between(None, None)
        );
        assert_eq!(
            DateCheck::from_args(
                DateCheckKind::Between,
                &[json!("a"), json!("b"), json!("c")]
            ),
            DateCheck::Between(None, None)
        );
    }
}
