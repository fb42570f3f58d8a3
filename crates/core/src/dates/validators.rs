//! Date validators: validate, before, after, between, format.
//!
//! Every validator follows the same protocol:
//! 1. Read the field. An empty value fails silently unless
//!    `validate_on_empty` is set.
//! 2. Resolve the value (and any comparison bounds) to a date.
//! 3. Compute the verdict.
//! 4. Apply the side effects the options allow.
//!
//! Nothing here returns an error: parse failures are "no date", and a
//! failed verdict is reported through the return value and, when asked
//! for, an error annotation on the record.

use chrono::NaiveDateTime;

use super::DateCheck;
use super::format::{FormatSpec, render, render_instant, render_or_iso};
use super::natural::{is_date, parse_date};
use super::relative::{self, evaluate_relative_at};
use crate::options::ValidationOptions;
use crate::record::{Effects, FieldRead, RecordAccess};

/// Read text laid out in the format specification, if one is given.
fn read_with_spec(text: &str, format: Option<&str>) -> Option<NaiveDateTime> {
    FormatSpec::parse(format?).parse_text(text)
}

/// Resolve a field value for `validate`/`format`: relative expression
/// first, then the specification's own layout, then free text.
fn resolve_value(text: &str, format: Option<&str>, now: NaiveDateTime) -> Option<NaiveDateTime> {
    evaluate_relative_at(text, now)
        .or_else(|| read_with_spec(text, format))
        .or_else(|| parse_date(text))
}

/// Resolve a comparison bound: free text first, then relative expression.
fn resolve_bound(text: Option<&str>, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let text = text?;
    if is_date(text) { parse_date(text) } else { evaluate_relative_at(text, now) }
}

fn changed_message(from: &str, to: &str) -> String {
    format!("value changed from '{from}' to '{to}'")
}

/// Check that the field holds a date.
///
/// On success the field is rewritten to the rendered format (ISO
/// `YYYY-MM-DD` when no format is given), whichever resolution path matched.
pub fn validate(
    record: &mut dyn RecordAccess,
    field: &str,
    format: Option<&str>,
    options: &ValidationOptions,
) -> bool {
    let read = FieldRead::from_record(&*record, field);
    if read.is_empty() && !options.validate_on_empty {
        return false;
    }

    let mut effects = Effects::new(record, field);
    match resolve_value(read.as_str(), format, relative::now()) {
        Some(dt) => {
            if options.set_record {
                effects.set(render_or_iso(&dt, format));
            }
            true
        }
        None => {
            tracing::debug!(field, value = read.as_str(), "not a date");
            if options.add_error {
                effects.add_error(&options.error_text(|| "Invalid date".to_string()));
            }
            false
        }
    }
}

/// Check that the field's date is strictly before `bound`.
pub fn before(
    record: &mut dyn RecordAccess,
    field: &str,
    bound: Option<&str>,
    format: Option<&str>,
    options: &ValidationOptions,
) -> bool {
    compare(record, field, Comparison::Before(bound), format, options)
}

/// Check that the field's date is strictly after `bound`.
pub fn after(
    record: &mut dyn RecordAccess,
    field: &str,
    bound: Option<&str>,
    format: Option<&str>,
    options: &ValidationOptions,
) -> bool {
    compare(record, field, Comparison::After(bound), format, options)
}

/// Check that the field's date lies in the open interval `(start, end)`.
///
/// Neither endpoint is itself valid.
pub fn between(
    record: &mut dyn RecordAccess,
    field: &str,
    start: Option<&str>,
    end: Option<&str>,
    format: Option<&str>,
    options: &ValidationOptions,
) -> bool {
    compare(record, field, Comparison::Between(start, end), format, options)
}

#[derive(Debug, Clone, Copy)]
enum Comparison<'a> {
    Before(Option<&'a str>),
    After(Option<&'a str>),
    Between(Option<&'a str>, Option<&'a str>),
}

impl Comparison<'_> {
    fn verdict(self, value: NaiveDateTime, now: NaiveDateTime) -> bool {
        match self {
            Self::Before(bound) => resolve_bound(bound, now).is_some_and(|b| value < b),
            Self::After(bound) => resolve_bound(bound, now).is_some_and(|b| value > b),
            Self::Between(start, end) => {
                match (resolve_bound(start, now), resolve_bound(end, now)) {
                    (Some(s), Some(e)) => s < value && value < e,
                    _ => false,
                }
            }
        }
    }

    fn default_message(self, format: Option<&str>, now: NaiveDateTime) -> String {
        let describe = |bound: Option<&str>| match resolve_bound(bound, now) {
            Some(dt) if format.is_some() => render(&dt, format),
            Some(dt) => render_instant(&dt),
            None => bound.unwrap_or("an unknown date").to_string(),
        };
        match self {
            Self::Before(bound) => format!("Date must be before {}", describe(bound)),
            Self::After(bound) => format!("Date must be after {}", describe(bound)),
            Self::Between(start, end) => {
                format!("Date must be between {} and {}", describe(start), describe(end))
            }
        }
    }
}

fn compare(
    record: &mut dyn RecordAccess,
    field: &str,
    comparison: Comparison<'_>,
    format: Option<&str>,
    options: &ValidationOptions,
) -> bool {
    let read = FieldRead::from_record(&*record, field);
    if read.is_empty() && !options.validate_on_empty {
        return false;
    }

    // One clock reading for the value and every bound, so `now` equals `now`.
    let now = relative::now();
    let mut effects = Effects::new(record, field);
    let text = read.as_str();

    let value = if let Some(dt) = read_with_spec(text, format) {
        Some(dt)
    } else if is_date(text) {
        parse_date(text)
    } else {
        let resolved = evaluate_relative_at(text, now);
        // A relative value is pinned to the date it resolved to right away,
        // whatever the comparison says.
        if let (Some(dt), Some(_)) = (resolved, format)
            && options.set_record
        {
            effects.set(render(&dt, format));
        }
        resolved
    };

    let verdict = value.is_some_and(|v| comparison.verdict(v, now));
    tracing::debug!(field, value = text, ?comparison, verdict, "date comparison");

    if !verdict && options.add_error {
        effects.add_error(&options.error_text(|| comparison.default_message(format, now)));
    }
    verdict
}

/// Render the field's date into canonical text.
///
/// Returns the rendered text, or `None` when the value is empty (and
/// `format_on_empty` is off) or is not a date. Never adds an error. The
/// record is written only when `set_record` is on, so the text can be
/// computed without persisting it.
pub fn format(
    record: &mut dyn RecordAccess,
    field: &str,
    format: Option<&str>,
    options: &ValidationOptions,
) -> Option<String> {
    let read = FieldRead::from_record(&*record, field);
    if read.is_empty() && !options.format_on_empty {
        return None;
    }

    let dt = resolve_value(read.as_str(), format, relative::now())?;
    let rendered = render_or_iso(&dt, format);

    let mut effects = Effects::new(record, field);
    if options.add_info && rendered != read.as_str() {
        effects.add_info(&options.info_text(|| changed_message(read.as_str(), &rendered)));
    }
    if options.set_record {
        effects.set(rendered.clone());
    }
    Some(rendered)
}

/// Run one date check, then format the field when the check passed or
/// `format_on_error` is set. Returns the check's verdict.
///
/// The info annotation compares the final text against the value as it was
/// before the check, since the check itself may already have rewritten it.
pub fn evaluate_and_format(
    record: &mut dyn RecordAccess,
    field: &str,
    check: &DateCheck,
    format_spec: Option<&str>,
    options: &ValidationOptions,
) -> bool {
    let original = FieldRead::from_record(&*record, field);
    let verdict = match check {
        DateCheck::Validate => validate(record, field, format_spec, options),
        DateCheck::Before(bound) => {
            before(record, field, bound.as_deref(), format_spec, options)
        }
        DateCheck::After(bound) => after(record, field, bound.as_deref(), format_spec, options),
        DateCheck::Between(start, end) => between(
            record,
            field,
            start.as_deref(),
            end.as_deref(),
            format_spec,
            options,
        ),
    };

    if verdict || options.format_on_error {
        let without_info = options.clone().add_info(false);
        if let Some(rendered) = format(record, field, format_spec, &without_info)
            && options.add_info
            && rendered != original.as_str()
        {
            Effects::new(record, field)
                .add_info(&options.info_text(|| changed_message(original.as_str(), &rendered)));
        }
    }
    verdict
}
