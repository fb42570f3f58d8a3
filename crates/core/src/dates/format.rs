//! Date format specifications.
//!
//! A format specification is a compact, case-insensitive template built
//! from year/month/day tokens and a delimiter:
//!
//! | token  | renders                          |
//! |--------|----------------------------------|
//! | `yyyy` | four-digit year                  |
//! | `yy`   | last two digits of the year      |
//! | `mmmm` | full month name (`March`)        |
//! | `mmm`  | short month name (`Mar`)         |
//! | `mm`   | zero-padded month                |
//! | `m`    | unpadded month                   |
//! | `dd`   | zero-padded day                  |
//! | `d`    | unpadded day                     |
//!
//! The delimiter is the first of `/`, `-`, `.` present in the
//! specification, otherwise a space. A specification that does not name
//! exactly three components renders as ISO `YYYY-MM-DD`.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use super::natural::{month_from_name, parse_small, parse_year};

const DELIMITERS: [char; 3] = ['/', '-', '.'];

/// ISO calendar date, the fallback rendering.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Rendering used when no specification is given at all.
const LOCALE_DEFAULT: &str = "%-m/%-d/%Y";

/// A run of identical letters, classified by length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// `y`, a lone year marker.
    Year,
    /// `yy` or `yyy`.
    Year2,
    /// `yyyy` or longer.
    Year4,
    MonthNumeric,
    MonthPadded,
    MonthShort,
    MonthFull,
    DayNumeric,
    DayPadded,
    /// Any other character.
    Literal(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Year,
    Month,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MonthStyle {
    Numeric,
    Padded,
    Short,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum YearStyle {
    Full,
    TwoDigit,
    FourDigit,
}

/// A parsed format specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    order: Vec<Component>,
    delimiter: char,
    year: YearStyle,
    month: MonthStyle,
    day_padded: bool,
}

impl FormatSpec {
    /// Parse a specification. Never fails; check [`FormatSpec::is_valid`].
    pub fn parse(spec: &str) -> Self {
        let lower = spec.to_lowercase();
        let delimiter = DELIMITERS.into_iter().find(|d| lower.contains(*d)).unwrap_or(' ');

        let mut order = Vec::new();
        let mut year = YearStyle::Full;
        let mut month = MonthStyle::Numeric;
        let mut day_padded = false;

        for fragment in lower.split(|c: char| DELIMITERS.contains(&c) || c == ' ') {
            let tokens = tokenize(fragment);

            for token in &tokens {
                match token {
                    Token::Year4 => year = year.max(YearStyle::FourDigit),
                    Token::Year2 => year = year.max(YearStyle::TwoDigit),
                    Token::MonthFull => month = month.max(MonthStyle::Full),
                    Token::MonthShort => month = month.max(MonthStyle::Short),
                    Token::MonthPadded => month = month.max(MonthStyle::Padded),
                    Token::DayPadded => day_padded = true,
                    Token::Year | Token::MonthNumeric | Token::DayNumeric | Token::Literal(_) => {}
                }
            }

            if let Some(component) = classify(&tokens) {
                order.push(component);
            }
        }

        Self { order, delimiter, year, month, day_padded }
    }

    /// True when the specification names exactly three components.
    pub fn is_valid(&self) -> bool {
        self.order.len() == 3
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Render a date. Invalid specifications render as ISO.
    pub fn render(&self, dt: &NaiveDateTime) -> String {
        if !self.is_valid() {
            return dt.format(ISO_DATE).to_string();
        }

        let parts: Vec<String> = self
            .order
            .iter()
            .map(|component| match component {
                Component::Year => self.render_year(dt),
                Component::Month => self.render_month(dt),
                Component::Day => {
                    if self.day_padded {
                        format!("{:02}", dt.day())
                    } else {
                        dt.day().to_string()
                    }
                }
            })
            .collect();

        parts.join(&self.delimiter.to_string())
    }

    /// Read text laid out in this specification back into a date.
    ///
    /// The text must use the specification's delimiter and component order,
    /// so `05/03/2024` under `dd/mm/yyyy` is March 5. Invalid
    /// specifications read nothing.
    pub fn parse_text(&self, text: &str) -> Option<NaiveDateTime> {
        if !self.is_valid() {
            return None;
        }

        let text = text.trim();
        let parts: Vec<&str> = if self.delimiter == ' ' {
            text.split_whitespace().map(|p| p.trim_end_matches(',')).collect()
        } else {
            text.split(self.delimiter).map(str::trim).collect()
        };
        if parts.len() != self.order.len() {
            return None;
        }

        let (mut year, mut month, mut day) = (None, None, None);
        for (component, part) in self.order.iter().zip(parts) {
            match component {
                Component::Year => year = parse_year(part),
                Component::Month => month = self.read_month(part),
                Component::Day => day = parse_small(part),
            }
        }

        NaiveDate::from_ymd_opt(year?, month?, day?).map(|date| date.and_time(NaiveTime::MIN))
    }

    fn read_month(&self, part: &str) -> Option<u32> {
        match self.month {
            MonthStyle::Full | MonthStyle::Short => month_from_name(part),
            MonthStyle::Padded | MonthStyle::Numeric => parse_small(part),
        }
    }

    fn render_year(&self, dt: &NaiveDateTime) -> String {
        match self.year {
            YearStyle::FourDigit => format!("{:04}", dt.year()),
            YearStyle::TwoDigit => {
                let full = format!("{:04}", dt.year());
                full[full.len() - 2..].to_string()
            }
            YearStyle::Full => dt.year().to_string(),
        }
    }

    fn render_month(&self, dt: &NaiveDateTime) -> String {
        match self.month {
            MonthStyle::Full => dt.format("%B").to_string(),
            MonthStyle::Short => dt.format("%b").to_string(),
            MonthStyle::Padded => format!("{:02}", dt.month()),
            MonthStyle::Numeric => dt.month().to_string(),
        }
    }
}

/// Split a fragment into runs of identical characters.
fn tokenize(fragment: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = fragment.chars().peekable();

    while let Some(c) = chars.next() {
        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }
        let token = match (c, run) {
            ('y', 1) => Token::Year,
            ('y', 2 | 3) => Token::Year2,
            ('y', _) => Token::Year4,
            ('m', 1) => Token::MonthNumeric,
            ('m', 2) => Token::MonthPadded,
            ('m', 3) => Token::MonthShort,
            ('m', _) => Token::MonthFull,
            ('d', 1) => Token::DayNumeric,
            ('d', _) => Token::DayPadded,
            (other, _) => Token::Literal(other),
        };
        tokens.push(token);
    }

    tokens
}

/// Year wins over month, month over day.
fn classify(tokens: &[Token]) -> Option<Component> {
    let has = |pred: fn(&Token) -> bool| tokens.iter().any(pred);

    if has(|t| matches!(t, Token::Year | Token::Year2 | Token::Year4)) {
        Some(Component::Year)
    } else if has(|t| {
        matches!(
            t,
            Token::MonthNumeric | Token::MonthPadded | Token::MonthShort | Token::MonthFull
        )
    }) {
        Some(Component::Month)
    } else if has(|t| matches!(t, Token::DayNumeric | Token::DayPadded)) {
        Some(Component::Day)
    } else {
        None
    }
}

/// Render a date with an optional specification.
///
/// Without a specification the locale-default numeric form (`3/15/2024`)
/// is used.
pub fn render(dt: &NaiveDateTime, spec: Option<&str>) -> String {
    match spec {
        Some(spec) => FormatSpec::parse(spec).render(dt),
        None => dt.format(LOCALE_DEFAULT).to_string(),
    }
}

/// Render with a specification, or ISO `YYYY-MM-DD` when none is given.
pub fn render_or_iso(dt: &NaiveDateTime, spec: Option<&str>) -> String {
    match spec {
        Some(spec) => FormatSpec::parse(spec).render(dt),
        None => dt.format(ISO_DATE).to_string(),
    }
}

/// ISO instant form, used to name a bound in error messages.
pub fn render_instant(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}
