//! String validation and canonical formatting.
//!
//! String checks share the date family's call protocol (read, judge, apply
//! side effects through the record) but judge text shape instead of
//! calendar meaning.

pub mod validators;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::value_text;

pub use validators::{check, evaluate_and_format, format};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringCheckKind {
    #[serde(rename = "validate")]
    Validate,
    #[serde(rename = "isEmail")]
    IsEmail,
    #[serde(rename = "isPhone")]
    IsPhone,
    #[serde(rename = "isSSN")]
    IsSsn,
    #[serde(rename = "matchesPattern")]
    MatchesPattern,
    #[serde(rename = "hasLength")]
    HasLength,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "max")]
    Max,
}

impl StringCheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::IsEmail => "isEmail",
            Self::IsPhone => "isPhone",
            Self::IsSsn => "isSSN",
            Self::MatchesPattern => "matchesPattern",
            Self::HasLength => "hasLength",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for StringCheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StringCheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "validate" => Ok(Self::Validate),
            "isEmail" => Ok(Self::IsEmail),
            "isPhone" => Ok(Self::IsPhone),
            "isSSN" => Ok(Self::IsSsn),
            "matchesPattern" => Ok(Self::MatchesPattern),
            "hasLength" => Ok(Self::HasLength),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            _ => Err(format!("unknown string check: {s}")),
        }
    }
}

/// A string check with its arguments.
///
/// Lengths count characters, not bytes. A missing `min`/`max` bound makes
/// the check fail; a missing `hasLength` side is unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringCheck {
    Validate,
    IsEmail,
    IsPhone,
    IsSsn,
    MatchesPattern(Option<String>),
    HasLength { min: Option<usize>, max: Option<usize> },
    Min(Option<usize>),
    Max(Option<usize>),
}

impl StringCheck {
    pub fn from_args(kind: StringCheckKind, args: &[Value]) -> Self {
        match kind {
            StringCheckKind::Validate => Self::Validate,
            StringCheckKind::IsEmail => Self::IsEmail,
            StringCheckKind::IsPhone => Self::IsPhone,
            StringCheckKind::IsSsn => Self::IsSsn,
            StringCheckKind::MatchesPattern => {
                let pattern = args.first().and_then(value_text);
                if pattern.is_none() {
                    tracing::warn!("matchesPattern without a pattern, check will fail");
                }
                Self::MatchesPattern(pattern)
            }
            StringCheckKind::HasLength => {
                let pair = match args {
                    [Value::Array(inner)] => inner.as_slice(),
                    other => other,
                };
                let min = pair.first().and_then(length_arg);
                let max = pair.get(1).and_then(length_arg);
                if min.is_none() && max.is_none() {
                    tracing::warn!("hasLength without bounds accepts any length");
                }
                Self::HasLength { min, max }
            }
            StringCheckKind::Min => Self::Min(bound(kind, args)),
            StringCheckKind::Max => Self::Max(bound(kind, args)),
        }
    }

    pub fn kind(&self) -> StringCheckKind {
        match self {
            Self::Validate => StringCheckKind::Validate,
            Self::IsEmail => StringCheckKind::IsEmail,
            Self::IsPhone => StringCheckKind::IsPhone,
            Self::IsSsn => StringCheckKind::IsSsn,
            Self::MatchesPattern(_) => StringCheckKind::MatchesPattern,
            Self::HasLength { .. } => StringCheckKind::HasLength,
            Self::Min(_) => StringCheckKind::Min,
            Self::Max(_) => StringCheckKind::Max,
        }
    }
}

fn length_arg(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn bound(kind: StringCheckKind, args: &[Value]) -> Option<usize> {
    let bound = args.first().and_then(length_arg);
    if bound.is_none() {
        tracing::warn!(check = %kind, "missing length bound, check will fail");
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_names_are_case_sensitive() {
        assert_eq!("isSSN".parse::<StringCheckKind>(), Ok(StringCheckKind::IsSsn));
        assert!("isssn".parse::<StringCheckKind>().is_err());
        assert_eq!(StringCheckKind::MatchesPattern.to_string(), "matchesPattern");
    }

    #[test]
    fn kind_deserializes_from_rule_names() {
        let kind: StringCheckKind = serde_json::from_value(json!("hasLength")).unwrap();
        assert_eq!(kind, StringCheckKind::HasLength);
    }

    #[test]
    fn from_args_lengths() {
        assert_eq!(
            StringCheck::from_args(StringCheckKind::HasLength, &[json!(2), json!("5")]),
            StringCheck::HasLength { min: Some(2), max: Some(5) }
        );
        assert_eq!(
            StringCheck::from_args(StringCheckKind::HasLength, &[json!([3, 4])]),
            StringCheck::HasLength { min: Some(3), max: Some(4) }
        );
        assert_eq!(
            StringCheck::from_args(StringCheckKind::Min, &[json!(-1)]),
            StringCheck::Min(None)
        );
        assert_eq!(StringCheck::from_args(StringCheckKind::Max, &[]), StringCheck::Max(None));
    }

    #[test]
    fn from_args_pattern() {
        assert_eq!(
            StringCheck::from_args(StringCheckKind::MatchesPattern, &[json!("^a+$")]),
            StringCheck::MatchesPattern(Some("^a+$".into()))
        );
    }
}
