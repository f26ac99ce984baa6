//! Input coercion filters.
//!
//! Every filter is total: it takes raw input as a [`serde_json::Value`] and
//! returns the typed value or `None`, never an error. Raw values are read
//! as text first (`true` reads as `"1"`, `false` and `null` as `""`).

use crate::{DateFormat, Interval};
use chrono::{Local, NaiveDate, NaiveDateTime};
use datashape_config::Settings;
use datashape_core::Email;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?(0|[1-9][0-9]*)$").unwrap());

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}$").unwrap()
});

static FLOAT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$").unwrap());

static LEADING_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?").unwrap());

// Characters outside these scripts are dropped from free text.
static FOREIGN_SCRIPT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Cyrillic}\p{Latin}\p{Common}]").unwrap());

/// Text form of a raw value.
pub fn as_text(raw: &Value) -> String {
    match raw {
        Value::Null | Value::Bool(false) | Value::Array(_) | Value::Object(_) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
    }
}

/// Loose falsiness: null, `false`, zero, `""`, `"0"` and empty containers.
fn is_falsy(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Integer reading of a leading number (`"1abc"` is 1, `"x"` is 0).
fn leading_integer(text: &str) -> i64 {
    LEADING_NUMBER_REGEX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map_or(0, |f| f as i64)
}

/// Free text with markup stripped and special characters encoded.
///
/// Tags are removed, `&`, `<`, `>`, `"` and `'` are HTML-encoded, control
/// characters are dropped unless `keep_line_breaks`, characters outside the
/// Latin, Cyrillic and Common scripts are removed and the result is
/// trimmed. Falsy or blank input gives `None`.
///
/// Only markup is removed: the text inside `<script>` and `<style>` is kept.
/// Entities in the input are decoded before encoding, so `&amp;` stays
/// `&amp;` rather than becoming `&amp;amp;`.
///
/// ```
/// use datashape_validation::filter_string;
/// use serde_json::json;
///
/// assert_eq!(
///     filter_string(&json!("<b>Hello</b> \"world\""), false).as_deref(),
///     Some("Hello &quot;world&quot;")
/// );
/// assert_eq!(filter_string(&json!("0"), false), None);
/// ```
pub fn filter_string(raw: &Value, keep_line_breaks: bool) -> Option<String> {
    if is_falsy(raw) {
        return None;
    }

    let stripped = ammonia::Builder::empty()
        .clean_content_tags(HashSet::new())
        .clean(&as_text(raw))
        .to_string()
        .replace("&nbsp;", "\u{a0}");

    let mut encoded = String::with_capacity(stripped.len());
    for ch in stripped.chars() {
        match ch {
            '"' => encoded.push_str("&quot;"),
            '\'' => encoded.push_str("&#039;"),
            c if !keep_line_breaks && (c as u32) < 32 => {}
            c => encoded.push(c),
        }
    }

    let filtered = FOREIGN_SCRIPT_REGEX.replace_all(&encoded, "");
    let trimmed = filtered.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trimmed, lowercased address when it is a valid mailbox.
pub fn filter_email(raw: &Value) -> Option<String> {
    Email::parse(&as_text(raw)).ok().map(|email| email.normalized())
}

/// Strict integer: optional sign, no leading zeros, no fraction.
///
/// Integral JSON numbers such as `4.0` are accepted.
pub fn filter_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::Bool(true) => Some(1),
        Value::String(s) => {
            let trimmed = s.trim();
            if INTEGER_REGEX.is_match(trimmed) {
                trimmed.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// [`filter_integer`] restricted to values of at least 1.
pub fn filter_positive_integer(raw: &Value) -> Option<i64> {
    filter_integer(raw).filter(|n| *n >= 1)
}

/// Float with `,` accepted as the decimal separator.
pub fn filter_float(raw: &Value) -> Option<f64> {
    let text = as_text(raw).replace(',', ".");
    let trimmed = text.trim();

    if !FLOAT_REGEX.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// `true` for `"true"`, `"on"`, `"Y"` and anything reading as integer 1.
pub fn filter_boolean(raw: &Value) -> bool {
    match raw {
        Value::Bool(b) => *b,
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .is_some_and(|i| i == 1),
        Value::String(s) => {
            matches!(s.as_str(), "true" | "on" | "Y") || leading_integer(s) == 1
        }
        _ => false,
    }
}

/// Canonical (hyphenated, lowercase) UUID string.
pub fn filter_uuid(raw: &Value) -> Option<String> {
    filter_uuid_as_uuid(raw).map(|uuid| uuid.hyphenated().to_string())
}

/// Parsed UUID. `urn:`, `uuid:` and braces are ignored; what remains must be
/// the 8-4-4-4-12 hyphenated layout.
pub fn filter_uuid_as_uuid(raw: &Value) -> Option<Uuid> {
    let mut text = as_text(raw);
    for marker in ["urn:", "uuid:", "URN:", "UUID:", "{", "}"] {
        text = text.replace(marker, "");
    }
    if !UUID_REGEX.is_match(&text) {
        return None;
    }
    Uuid::try_parse(&text).ok()
}

/// Date in `format`; the input must round-trip exactly.
pub fn filter_date(raw: &Value, format: &str) -> Option<NaiveDate> {
    let text = as_text(raw);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    DateFormat::new(format).parse_date(trimmed)
}

/// Date-time in `format`; the input must round-trip exactly.
pub fn filter_date_time(raw: &Value, format: &str) -> Option<NaiveDateTime> {
    let text = as_text(raw);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    DateFormat::new(format).parse_date_time(trimmed)
}

/// The current local time shifted by an interval expression.
pub fn filter_date_time_by_interval(raw: &Value) -> Option<NaiveDateTime> {
    filter_date_time_by_interval_from(raw, Local::now().naive_local())
}

/// `base` shifted by an interval expression (see [`Interval`]).
pub fn filter_date_time_by_interval_from(raw: &Value, base: NaiveDateTime) -> Option<NaiveDateTime> {
    Interval::parse(&as_text(raw))?.apply(base)
}

/// Filters bound to configured default date formats.
///
/// ```
/// use datashape_validation::FilterSet;
/// use serde_json::json;
///
/// let filters = FilterSet::new("d.m.Y", "d.m.Y H:i");
/// assert!(filters.date(&json!("31.12.2024")).is_some());
/// assert_eq!(filters.integer(&json!("42")), Some(42));
/// ```
#[derive(Debug, Clone)]
pub struct FilterSet {
    date_format: DateFormat,
    date_time_format: DateFormat,
}

impl FilterSet {
    pub fn new(date_format: &str, date_time_format: &str) -> Self {
        Self {
            date_format: DateFormat::new(date_format),
            date_time_format: DateFormat::new(date_time_format),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.date_format, &settings.date_time_format)
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    pub fn date_time_format(&self) -> &DateFormat {
        &self.date_time_format
    }

    pub fn string(&self, raw: &Value) -> Option<String> {
        filter_string(raw, false)
    }

    /// Like [`FilterSet::string`] but control characters such as line breaks survive.
    pub fn text(&self, raw: &Value) -> Option<String> {
        filter_string(raw, true)
    }

    pub fn email(&self, raw: &Value) -> Option<String> {
        filter_email(raw)
    }

    pub fn integer(&self, raw: &Value) -> Option<i64> {
        filter_integer(raw)
    }

    pub fn positive_integer(&self, raw: &Value) -> Option<i64> {
        filter_positive_integer(raw)
    }

    pub fn float(&self, raw: &Value) -> Option<f64> {
        filter_float(raw)
    }

    pub fn boolean(&self, raw: &Value) -> bool {
        filter_boolean(raw)
    }

    pub fn uuid(&self, raw: &Value) -> Option<String> {
        filter_uuid(raw)
    }

    pub fn uuid_as_uuid(&self, raw: &Value) -> Option<Uuid> {
        filter_uuid_as_uuid(raw)
    }

    /// Date in the configured date format.
    pub fn date(&self, raw: &Value) -> Option<NaiveDate> {
        let text = as_text(raw);
        let trimmed = text.trim();
        (!trimmed.is_empty())
            .then(|| self.date_format.parse_date(trimmed))
            .flatten()
    }

    /// Date-time in the configured date-time format.
    pub fn date_time(&self, raw: &Value) -> Option<NaiveDateTime> {
        let text = as_text(raw);
        let trimmed = text.trim();
        (!trimmed.is_empty())
            .then(|| self.date_time_format.parse_date_time(trimmed))
            .flatten()
    }

    pub fn date_time_by_interval(&self, raw: &Value) -> Option<NaiveDateTime> {
        filter_date_time_by_interval(raw)
    }
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
