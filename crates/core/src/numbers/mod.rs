//! Numeric validation and formatting.
//!
//! Values are parsed after trimming and stripping `,` thousands separators.
//! Unlike date `between`, numeric bounds are inclusive.

pub mod validators;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use validators::{check, evaluate_and_format, format};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberCheckKind {
    #[serde(rename = "validate")]
    Validate,
    #[serde(rename = "isInteger")]
    IsInteger,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "between")]
    Between,
}

impl NumberCheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::IsInteger => "isInteger",
            Self::Min => "min",
            Self::Max => "max",
            Self::Between => "between",
        }
    }
}

impl fmt::Display for NumberCheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumberCheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "validate" => Ok(Self::Validate),
            "isInteger" => Ok(Self::IsInteger),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "between" => Ok(Self::Between),
            _ => Err(format!("unknown number check: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberCheck {
    Validate,
    IsInteger,
    Min(Option<f64>),
    Max(Option<f64>),
    Between(Option<f64>, Option<f64>),
}

impl NumberCheck {
    pub fn from_args(kind: NumberCheckKind, args: &[Value]) -> Self {
        match kind {
            NumberCheckKind::Validate => Self::Validate,
            NumberCheckKind::IsInteger => Self::IsInteger,
            NumberCheckKind::Min => Self::Min(bound(kind, args.first())),
            NumberCheckKind::Max => Self::Max(bound(kind, args.first())),
            NumberCheckKind::Between => {
                let pair = match args {
                    [Value::Array(inner)] => inner.as_slice(),
                    other => other,
                };
                match pair {
                    [lo, hi] => Self::Between(bound(kind, Some(lo)), bound(kind, Some(hi))),
                    _ => {
                        tracing::warn!(
                            count = pair.len(),
                            "between expects exactly two bounds, check will fail"
                        );
                        Self::Between(None, None)
                    }
                }
            }
        }
    }

    pub fn kind(&self) -> NumberCheckKind {
        match self {
            Self::Validate => NumberCheckKind::Validate,
            Self::IsInteger => NumberCheckKind::IsInteger,
            Self::Min(_) => NumberCheckKind::Min,
            Self::Max(_) => NumberCheckKind::Max,
            Self::Between(..) => NumberCheckKind::Between,
        }
    }
}

/// Parse a number as typed by a person: `1,234.5`, ` 42 `, `-0.5`.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn bound(kind: NumberCheckKind, arg: Option<&Value>) -> Option<f64> {
    let parsed = match arg {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_number(s),
        _ => None,
    };
    if parsed.is_none() {
        tracing::warn!(check = %kind, ?arg, "missing or non-numeric bound, check will fail");
    }
    parsed
}
