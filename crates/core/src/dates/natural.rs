//! Free-text date parsing.
//!
//! Accepts the shapes people actually type into date fields:
//! - RFC 3339 / RFC 2822 timestamps, ISO date-times
//! - Numeric dates: `2024-03-15`, `03/15/2024`, `3.15.24`, `15/03/2024`
//! - Month names: `March 15, 2024`, `15 Mar 2024`, `2024 March 15`
//!
//! Numeric dates are read year-first when the first token has four digits,
//! otherwise month-first with a day-first fallback. Relative expressions
//! (`now+5days`) are never handled here; see [`super::relative`].

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

use super::relative::is_relative_expr;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const MONTH_NAMES: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

const WEEKDAY_NAMES: &[&str] =
    &["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];

/// True if `text` is a date this parser understands.
///
/// Relative expressions are excluded even though they resolve to dates:
/// they must only be resolved through the relative evaluator.
pub fn is_date(text: &str) -> bool {
    !is_relative_expr(text) && parse_date(text).is_some()
}

/// Parse free text into a local date-time. Date-only input resolves to midnight.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let parsed = parse_timestamp(text).or_else(|| {
        parse_calendar_date(text).map(|date| date.and_time(NaiveTime::MIN))
    });
    if parsed.is_none() {
        tracing::trace!(text, "not a date");
    }
    parsed
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

/// A date token: a run of digits or a run of letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Number(&'a str),
    Word(&'a str),
}

fn tokenize(text: &str) -> Option<Vec<Token<'_>>> {
    text.split(|c: char| c.is_whitespace() || matches!(c, ',' | '/' | '.' | '-'))
        .filter(|part| !part.is_empty())
        .map(|part| {
            if part.chars().all(|c| c.is_ascii_alphabetic()) {
                return Some(Token::Word(part));
            }
            // 15th, 1st, 22nd, 3rd
            let digits = part.trim_end_matches(|c: char| c.is_ascii_alphabetic());
            let suffix = &part[digits.len()..];
            let ordinal = matches!(suffix.to_lowercase().as_str(), "" | "st" | "nd" | "rd" | "th");
            (ordinal && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
                .then_some(Token::Number(digits))
        })
        .collect()
}

fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let mut tokens = tokenize(text)?;

    // Leading weekday names carry no information: "Fri, March 15 2024"
    if tokens.len() == 4
        && let Token::Word(w) = tokens[0]
        && is_weekday(w)
    {
        tokens.remove(0);
    }

    let [a, b, c] = tokens.as_slice() else {
        return None;
    };

    match (*a, *b, *c) {
        (Token::Number(y), Token::Number(m), Token::Number(d)) if y.len() == 4 => {
            ymd(y, m, d)
        }
        (Token::Number(m), Token::Number(d), Token::Number(y)) => {
            ymd(y, m, d).or_else(|| ymd(y, d, m))
        }
        (Token::Word(name), Token::Number(x), Token::Number(y))
        | (Token::Number(x), Token::Word(name), Token::Number(y))
        | (Token::Number(x), Token::Number(y), Token::Word(name)) => {
            let month = month_from_name(name)?;
            // The four-digit number is the year wherever it sits
            let (year, day) = if x.len() >= 3 { (x, y) } else { (y, x) };
            NaiveDate::from_ymd_opt(parse_year(year)?, month, parse_small(day)?)
        }
        _ => None,
    }
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(parse_year(year)?, parse_small(month)?, parse_small(day)?)
}

pub(super) fn parse_small(s: &str) -> Option<u32> {
    if s.len() > 2 {
        return None;
    }
    s.parse().ok()
}

/// Four-digit years are taken as-is; one or two digits use a 1950-2049 window.
pub(super) fn parse_year(s: &str) -> Option<i32> {
    let n: i32 = s.parse().ok()?;
    match s.len() {
        4 => Some(n),
        1 | 2 if n < 50 => Some(2000 + n),
        1 | 2 => Some(1900 + n),
        _ => None,
    }
}

pub(super) fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    if lower == "sept" {
        return Some(9);
    }
    MONTH_NAMES
        .iter()
        .find(|(full, _)| *full == lower || (lower.len() == 3 && full.starts_with(&lower)))
        .map(|(_, n)| *n)
}

fn is_weekday(word: &str) -> bool {
    let lower = word.to_lowercase();
    lower.len() >= 3 && WEEKDAY_NAMES.iter().any(|d| *d == lower || d.starts_with(&lower))
}
