//! Date format patterns.
//!
//! Patterns use either the `Y-m-d H:i:s` token language or chrono's
//! strftime syntax. A pattern containing `%` is taken as strftime as-is.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::Write;

/// A date pattern compiled to strftime.
///
/// Parsing is strict: a value is accepted only when formatting the parsed
/// result with the same pattern reproduces the input exactly.
///
/// ```
/// use datashape_validation::DateFormat;
///
/// let format = DateFormat::new("d.m.Y");
/// assert_eq!(format.as_strftime(), "%d.%m.%Y");
/// assert!(format.parse_date("05.01.2024").is_some());
/// assert!(format.parse_date("5.1.2024").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    source: String,
    strftime: String,
}

impl DateFormat {
    pub fn new(format: &str) -> Self {
        let strftime = if format.contains('%') {
            format.to_string()
        } else {
            translate(format)
        };

        Self {
            source: format.to_string(),
            strftime,
        }
    }

    /// The pattern as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn as_strftime(&self) -> &str {
        &self.strftime
    }

    pub fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        let date = NaiveDate::parse_from_str(value, &self.strftime).ok()?;
        (self.format_date(&date)? == value).then_some(date)
    }

    /// Parse a date-time; patterns without time tokens yield midnight.
    pub fn parse_date_time(&self, value: &str) -> Option<NaiveDateTime> {
        let date_time = NaiveDateTime::parse_from_str(value, &self.strftime)
            .or_else(|_| {
                NaiveDate::parse_from_str(value, &self.strftime)
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
            .ok()?;
        (self.format_date_time(&date_time)? == value).then_some(date_time)
    }

    /// `None` when the pattern needs fields a date does not have.
    pub fn format_date(&self, date: &NaiveDate) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", date.format(&self.strftime)).ok()?;
        Some(out)
    }

    pub fn format_date_time(&self, date_time: &NaiveDateTime) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", date_time.format(&self.strftime)).ok()?;
        Some(out)
    }
}

fn translate(format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();

    while let Some(ch) = chars.next() {
        let spec = match ch {
            'Y' => "%Y",
            'y' => "%y",
            'm' => "%m",
            'n' => "%-m",
            'd' => "%d",
            'j' => "%-d",
            'H' => "%H",
            'G' => "%-H",
            'h' => "%I",
            'g' => "%-I",
            'i' => "%M",
            's' => "%S",
            'v' => "%3f",
            'u' => "%6f",
            'A' => "%p",
            'a' => "%P",
            'D' => "%a",
            'l' => "%A",
            'N' => "%u",
            'M' => "%b",
            'F' => "%B",
            'U' => "%s",
            '\\' => {
                if let Some(escaped) = chars.next() {
                    push_literal(&mut out, escaped);
                }
                continue;
            }
            other => {
                push_literal(&mut out, other);
                continue;
            }
        };
        out.push_str(spec);
    }

    out
}

fn push_literal(out: &mut String, ch: char) {
    if ch == '%' {
        out.push_str("%%");
    } else {
        out.push(ch);
    }
}
