//! Numeric validators.

use serde_json::{Number, Value};

use super::{NumberCheck, parse_number};
use crate::options::ValidationOptions;
use crate::record::{Effects, FieldRead, RecordAccess};

/// Largest magnitude written back as a JSON integer.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

impl NumberCheck {
    fn matches(&self, n: f64) -> bool {
        match *self {
            Self::Validate => true,
            Self::IsInteger => n.fract() == 0.0,
            Self::Min(bound) => bound.is_some_and(|lo| n >= lo),
            Self::Max(bound) => bound.is_some_and(|hi| n <= hi),
            Self::Between(Some(lo), Some(hi)) => lo <= n && n <= hi,
            Self::Between(..) => false,
        }
    }

    fn default_message(&self) -> String {
        let describe = |bound: Option<f64>| bound.map_or("?".to_string(), |b| b.to_string());
        match *self {
            Self::Validate => "Invalid number".to_string(),
            Self::IsInteger => "Must be a whole number".to_string(),
            Self::Min(lo) => format!("Must be at least {}", describe(lo)),
            Self::Max(hi) => format!("Must be at most {}", describe(hi)),
            Self::Between(lo, hi) => {
                format!("Must be between {} and {}", describe(lo), describe(hi))
            }
        }
    }
}

/// Canonical decimal text, with a fixed number of fractional digits when
/// `precision` is given.
pub fn render(n: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{n:.p$}"),
        None => n.to_string(),
    }
}

/// The value written back to the record. Without a precision the number is
/// stored as a JSON number; with one it stays text so trailing zeros survive.
fn stored_value(n: f64, precision: Option<usize>) -> Value {
    if precision.is_none() {
        if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INT {
            return Value::Number(Number::from(n as i64));
        }
        if let Some(num) = Number::from_f64(n) {
            return Value::Number(num);
        }
    }
    Value::String(render(n, precision))
}

/// Run one numeric check against a field. Non-numeric values always fail.
pub fn check(
    record: &mut dyn RecordAccess,
    field: &str,
    check: &NumberCheck,
    options: &ValidationOptions,
) -> bool {
    let read = FieldRead::from_record(&*record, field);
    if read.is_empty() && !options.validate_on_empty {
        return false;
    }

    let parsed = parse_number(read.as_str());
    let verdict = parsed.is_some_and(|n| check.matches(n));
    tracing::debug!(field, check = %check.kind(), ?parsed, verdict, "number check");

    if !verdict && options.add_error {
        let message = match parsed {
            Some(_) => options.error_text(|| check.default_message()),
            None => options.error_text(|| "Invalid number".to_string()),
        };
        Effects::new(record, field).add_error(&message);
    }
    verdict
}

/// Rewrite the field as a canonical number. No-op when it does not parse.
pub fn format(
    record: &mut dyn RecordAccess,
    field: &str,
    precision: Option<usize>,
    options: &ValidationOptions,
) -> Option<String> {
    let read = FieldRead::from_record(&*record, field);
    if read.is_empty() && !options.format_on_empty {
        return None;
    }

    let n = parse_number(read.as_str())?;
    let rendered = render(n, precision);
    let mut effects = Effects::new(record, field);
    if options.add_info && rendered != read.as_str() {
        effects.add_info(&options.info_text(|| {
            format!("value changed from '{}' to '{}'", read.as_str(), rendered)
        }));
    }
    if options.set_record {
        effects.set(stored_value(n, precision));
    }
    Some(rendered)
}

/// Run one check, then format when it passed or `format_on_error` is set.
pub fn evaluate_and_format(
    record: &mut dyn RecordAccess,
    field: &str,
    number_check: &NumberCheck,
    precision: Option<usize>,
    options: &ValidationOptions,
) -> bool {
    let verdict = check(record, field, number_check, options);
    if verdict || options.format_on_error {
        format(record, field, precision, options);
    }
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use rstest::rstest;
    use serde_json::json;

    fn opts() -> ValidationOptions {
        ValidationOptions::default()
    }

    #[rstest]
    #[case(NumberCheck::Validate, "1,234.5", true)]
    #[case(NumberCheck::Validate, "12abc", false)]
    #[case(NumberCheck::IsInteger, "42", true)]
    #[case(NumberCheck::IsInteger, "42.5", false)]
    #[case(NumberCheck::Min(Some(10.0)), "10", true)]
    #[case(NumberCheck::Min(Some(10.0)), "9.99", false)]
    #[case(NumberCheck::Max(Some(10.0)), "10", true)]
    #[case(NumberCheck::Max(None), "1", false)]
    #[case(NumberCheck::Between(Some(1.0), Some(5.0)), "1", true)]
    #[case(NumberCheck::Between(Some(1.0), Some(5.0)), "5", true)]
    #[case(NumberCheck::Between(Some(1.0), Some(5.0)), "5.01", false)]
    #[case(NumberCheck::Between(None, Some(5.0)), "3", false)]
    fn verdicts(#[case] number_check: NumberCheck, #[case] input: &str, #[case] ok: bool) {
        let mut r = Record::from_pairs([("n", json!(input))]);
        assert_eq!(check(&mut r, "n", &number_check, &opts().add_error(false)), ok);
    }

    #[test]
    fn json_numbers_are_read() {
        let mut r = Record::from_pairs([("n", json!(7))]);
        assert!(check(&mut r, "n", &NumberCheck::IsInteger, &opts()));
    }

    #[test]
    fn error_messages() {
        let mut r = Record::from_pairs([("n", json!("abc")), ("m", json!("0"))]);
        check(&mut r, "n", &NumberCheck::Min(Some(1.0)), &opts());
        check(&mut r, "m", &NumberCheck::Between(Some(1.0), Some(2.5)), &opts());
        assert_eq!(r.errors("n"), ["Invalid number".to_string()]);
        assert_eq!(r.errors("m"), ["Must be between 1 and 2.5".to_string()]);
    }

    #[test]
    fn format_without_precision_stores_number() {
        let mut r = Record::from_pairs([("n", json!(" 1,200 "))]);
        assert!(evaluate_and_format(&mut r, "n", &NumberCheck::Validate, None, &opts()));
        assert_eq!(r.get("n"), Some(&json!(1200)));

        let mut r = Record::from_pairs([("n", json!("0.25"))]);
        evaluate_and_format(&mut r, "n", &NumberCheck::Validate, None, &opts());
        assert_eq!(r.get("n"), Some(&json!(0.25)));
    }

    #[test]
    fn format_with_precision_stores_text() {
        let mut r = Record::from_pairs([("n", json!("3.14159"))]);
        let out = format(&mut r, "n", Some(2), &opts().add_info(true));
        assert_eq!(out.as_deref(), Some("3.14"));
        assert_eq!(r.get("n"), Some(&json!("3.14")));
        assert_eq!(r.infos("n"), ["value changed from '3.14159' to '3.14'".to_string()]);
    }

    #[test]
    fn failed_check_skips_format() {
        let mut r = Record::from_pairs([("n", json!("1,500"))]);
        assert!(!evaluate_and_format(&mut r, "n", &NumberCheck::Max(Some(1000.0)), None, &opts()));
        assert_eq!(r.get("n"), Some(&json!("1,500")));
    }

    #[test]
    fn render_forms() {
        assert_eq!(render(2.0, None), "2");
        assert_eq!(render(2.5, None), "2.5");
        assert_eq!(render(2.0, Some(2)), "2.00");
    }
}
