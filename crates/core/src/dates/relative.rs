//! Relative date expressions.
//!
//! Supports expressions like:
//! - `now`
//! - `now+5days`, `now-1day`
//! - `now+3months`, `now-2years`
//!
//! Matching is case-insensitive and evaluates against the wall clock at
//! call time, never against a stored value.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use regex::Regex;

static RELATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^now([+-])(\d+)(days?|months?|years?)$").expect("valid regex")
});

/// Units for relative offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeUnit {
    Days,
    Months,
    Years,
}

impl RelativeUnit {
    /// Parse a unit word. A trailing `s` is optional.
    fn parse(word: &str) -> Option<Self> {
        let lower = word.to_lowercase();
        match lower.strip_suffix('s').unwrap_or(&lower) {
            "day" => Some(Self::Days),
            "month" => Some(Self::Months),
            "year" => Some(Self::Years),
            _ => None,
        }
    }
}

/// A parsed relative date expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDate {
    /// Plain `now`.
    Now,
    /// `now` shifted by a signed amount of units.
    Offset { amount: i64, unit: RelativeUnit },
}

impl RelativeDate {
    /// Parse a relative date expression. Returns `None` for anything else.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("now") {
            return Some(Self::Now);
        }

        let caps = RELATIVE_RE.captures(input)?;
        let amount: i64 = caps[2].parse().ok()?;
        let unit = RelativeUnit::parse(&caps[3])?;
        let amount = if &caps[1] == "-" { -amount } else { amount };
        Some(Self::Offset { amount, unit })
    }

    /// Resolve against `now`. `None` when the result is out of range.
    pub fn resolve(self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::Now => Some(now),
            Self::Offset { amount, unit } => match unit {
                RelativeUnit::Days => {
                    now.checked_add_signed(Duration::try_days(amount)?)
                }
                RelativeUnit::Months => {
                    add_months(now.date(), amount).map(|d| d.and_time(now.time()))
                }
                RelativeUnit::Years => add_months(now.date(), amount.checked_mul(12)?)
                    .map(|d| d.and_time(now.time())),
            },
        }
    }
}

/// Current local wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// True if `input` is a relative date expression.
pub fn is_relative_expr(input: &str) -> bool {
    RelativeDate::parse(input).is_some()
}

/// Evaluate a relative date expression against the current clock.
pub fn evaluate_relative(input: &str) -> Option<NaiveDateTime> {
    evaluate_relative_at(input, now())
}

/// Evaluate a relative date expression against a fixed `now`.
pub fn evaluate_relative_at(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let expr = RelativeDate::parse(input)?;
    let resolved = expr.resolve(now);
    tracing::trace!(input, ?expr, ?resolved, "relative date");
    resolved
}

/// Shift a date by whole months, clamping the day to the target month's length.
fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let total_months = i64::from(date.year()) * 12 + i64::from(date.month0()) + months;
    let new_year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let new_month = u32::try_from(total_months.rem_euclid(12)).ok()? + 1;

    // Jan 31 + 1 month = Feb 28/29
    let new_day = date.day().min(days_in_month(new_year, new_month));

    NaiveDate::from_ymd_opt(new_year, new_month, new_day)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(10, 30, 0).unwrap())
    }

    #[test]
    fn test_parse_now() {
        assert_eq!(RelativeDate::parse("now"), Some(RelativeDate::Now));
        assert_eq!(RelativeDate::parse("NOW"), Some(RelativeDate::Now));
        assert_eq!(RelativeDate::parse(" now "), Some(RelativeDate::Now));
    }

    #[test]
    fn test_parse_offsets() {
        assert_eq!(
            RelativeDate::parse("now+5days"),
            Some(RelativeDate::Offset { amount: 5, unit: RelativeUnit::Days })
        );
        assert_eq!(
            RelativeDate::parse("now-1day"),
            Some(RelativeDate::Offset { amount: -1, unit: RelativeUnit::Days })
        );
        assert_eq!(
            RelativeDate::parse("Now+3Months"),
            Some(RelativeDate::Offset { amount: 3, unit: RelativeUnit::Months })
        );
        assert_eq!(
            RelativeDate::parse("now-2YEARS"),
            Some(RelativeDate::Offset { amount: -2, unit: RelativeUnit::Years })
        );
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert_eq!(RelativeDate::parse("now + 5 days"), None);
        assert_eq!(RelativeDate::parse("now+5weeks"), None);
        assert_eq!(RelativeDate::parse("now+days"), None);
        assert_eq!(RelativeDate::parse("today"), None);
        assert_eq!(RelativeDate::parse("2024-01-01"), None);
        assert_eq!(RelativeDate::parse("now+99999999999999999999days"), None);
    }

    #[test]
    fn test_evaluate_days() {
        let now = at(2024, 3, 15);
        assert_eq!(evaluate_relative_at("now+5days", now), Some(at(2024, 3, 20)));
        assert_eq!(evaluate_relative_at("now-15days", now), Some(at(2024, 2, 29)));
        assert_eq!(evaluate_relative_at("now+0days", now), Some(now));
    }

    #[test]
    fn test_evaluate_months_and_years() {
        let now = at(2024, 1, 31);
        assert_eq!(evaluate_relative_at("now+1month", now), Some(at(2024, 2, 29)));
        assert_eq!(evaluate_relative_at("now-2months", now), Some(at(2023, 11, 30)));
        assert_eq!(evaluate_relative_at("now+13months", now), Some(at(2025, 2, 28)));
        assert_eq!(evaluate_relative_at("now-1year", now), Some(at(2023, 1, 31)));
    }

    #[test]
    fn test_evaluate_non_match_is_none() {
        assert_eq!(evaluate_relative_at("yesterday", at(2024, 1, 1)), None);
        assert_eq!(evaluate_relative_at("", at(2024, 1, 1)), None);
    }

    #[test]
    fn test_now_plus_zero_matches_now() {
        let a = evaluate_relative("now+0days").unwrap();
        let b = evaluate_relative("now").unwrap();
        assert!((b - a).num_seconds().abs() <= 1);
    }

    #[test]
    fn test_add_months_leap_year() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        assert_eq!(add_months(date, 1), NaiveDate::from_ymd_opt(2023, 2, 28));
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(add_months(date, -1), NaiveDate::from_ymd_opt(2024, 2, 29));
    }
}
