//! String validators.

use std::sync::LazyLock;

use regex::Regex;

use super::StringCheck;
use crate::options::ValidationOptions;
use crate::record::{Effects, FieldRead, RecordAccess};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9-]+(\.[a-z0-9-]+)*\.[a-z]{2,}$")
        .expect("valid regex")
});

/// North American numbers: optional `+1`/`1` prefix, area code and exchange
/// starting 2-9, separators `( ) . -` or space.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+?1[\s.-]?)?\(?([2-9]\d{2})\)?[\s.-]?([2-9]\d{2})[\s.-]?(\d{4})$")
        .expect("valid regex")
});

// The regex crate has no lookahead; excluded ranges are checked on the groups.
static SSN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})-?(\d{2})-?(\d{4})$").expect("valid regex"));

fn phone_parts(text: &str) -> Option<(&str, &str, &str)> {
    let caps = PHONE_RE.captures(text)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(3)?.as_str()))
}

fn ssn_parts(text: &str) -> Option<(&str, &str, &str)> {
    let caps = SSN_RE.captures(text)?;
    let (area, group, serial) = (caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(3)?.as_str());
    let excluded = area == "000"
        || area == "666"
        || area.starts_with('9')
        || group == "00"
        || serial == "0000";
    (!excluded).then_some((area, group, serial))
}

impl StringCheck {
    fn matches(&self, text: &str) -> bool {
        let trimmed = text.trim();
        let len = trimmed.chars().count();
        match self {
            Self::Validate => !trimmed.is_empty(),
            Self::IsEmail => EMAIL_RE.is_match(trimmed),
            Self::IsPhone => phone_parts(trimmed).is_some(),
            Self::IsSsn => ssn_parts(trimmed).is_some(),
            Self::MatchesPattern(None) => false,
            Self::MatchesPattern(Some(pattern)) => match Regex::new(pattern) {
                Ok(re) => re.is_match(text),
                Err(err) => {
                    tracing::warn!(pattern, %err, "invalid pattern");
                    false
                }
            },
            Self::HasLength { min, max } => {
                min.is_none_or(|m| len >= m) && max.is_none_or(|m| len <= m)
            }
            Self::Min(bound) => bound.is_some_and(|m| len >= m),
            Self::Max(bound) => bound.is_some_and(|m| len <= m),
        }
    }

    /// Canonical text for a value, or `None` when it has no canonical form.
    fn canonical(&self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        match self {
            Self::IsEmail => Some(trimmed.to_lowercase()),
            Self::IsPhone => {
                phone_parts(trimmed).map(|(area, exchange, line)| format!("({area}) {exchange}-{line}"))
            }
            Self::IsSsn => {
                ssn_parts(trimmed).map(|(area, group, serial)| format!("{area}-{group}-{serial}"))
            }
            _ => Some(trimmed.to_string()),
        }
    }

    fn default_message(&self) -> String {
        match self {
            Self::Validate => "Value is required".to_string(),
            Self::IsEmail => "Invalid email address".to_string(),
            Self::IsPhone => "Invalid phone number".to_string(),
            Self::IsSsn => "Invalid SSN".to_string(),
            Self::MatchesPattern(Some(p)) => format!("Value does not match pattern {p}"),
            Self::MatchesPattern(None) => "Value does not match pattern".to_string(),
            Self::HasLength { min: Some(lo), max: Some(hi) } => {
                format!("Length must be between {lo} and {hi} characters")
            }
            Self::HasLength { min: Some(n), max: None } | Self::Min(Some(n)) => {
                format!("Must be at least {n} characters")
            }
            Self::HasLength { min: None, max: Some(n) } | Self::Max(Some(n)) => {
                format!("Must be at most {n} characters")
            }
            Self::HasLength { .. } | Self::Min(None) | Self::Max(None) => {
                "Invalid length".to_string()
            }
        }
    }
}

/// Run one string check against a field. Returns the verdict.
pub fn check(
    record: &mut dyn RecordAccess,
    field: &str,
    check: &StringCheck,
    options: &ValidationOptions,
) -> bool {
    let read = FieldRead::from_record(&*record, field);
    if read.is_empty() && !options.validate_on_empty {
        return false;
    }

    let verdict = check.matches(read.as_str());
    tracing::debug!(field, check = %check.kind(), verdict, "string check");

    if !verdict && options.add_error {
        let mut effects = Effects::new(record, field);
        effects.add_error(&options.error_text(|| check.default_message()));
    }
    verdict
}

/// Rewrite the field to the check's canonical form.
///
/// Phone numbers and SSNs that do not match their shape are left alone.
/// Never adds an error.
pub fn format(
    record: &mut dyn RecordAccess,
    field: &str,
    check: &StringCheck,
    options: &ValidationOptions,
) -> Option<String> {
    let read = FieldRead::from_record(&*record, field);
    if read.is_empty() && !options.format_on_empty {
        return None;
    }

    let rendered = check.canonical(read.as_str())?;
    let mut effects = Effects::new(record, field);
    if options.add_info && rendered != read.as_str() {
        effects.add_info(&options.info_text(|| {
            format!("value changed from '{}' to '{}'", read.as_str(), rendered)
        }));
    }
    if options.set_record {
        effects.set(rendered.clone());
    }
    Some(rendered)
}

/// Run one check, then format when it passed or `format_on_error` is set.
pub fn evaluate_and_format(
    record: &mut dyn RecordAccess,
    field: &str,
    string_check: &StringCheck,
    options: &ValidationOptions,
) -> bool {
    let verdict = check(record, field, string_check, options);
    if verdict || options.format_on_error {
        format(record, field, string_check, options);
    }
    verdict
}
