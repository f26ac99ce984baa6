//! Email address value object.

use crate::{CoreError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Same shape as the field validator pattern, but the domain must contain a dot.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$").unwrap()
});

const MAX_LENGTH: usize = 254;
const MAX_LOCAL_LENGTH: usize = 64;

/// A syntactically valid email address.
///
/// The address keeps the spelling it was created with; [`Email::normalized`]
/// gives the lowercase form used for identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parse an address, trimming surrounding whitespace.
    ///
    /// ```
    /// use datashape_core::Email;
    ///
    /// let email = Email::parse(" Jane@Example.com ").unwrap();
    /// assert_eq!(email.as_str(), "Jane@Example.com");
    /// assert_eq!(email.normalized(), "jane@example.com");
    /// assert!(Email::parse("jane@localhost").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if Self::is_valid(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(CoreError::InvalidEmail(raw.to_string()))
        }
    }

    /// Lenient constructor: `None` instead of an error.
    pub fn try_from_raw(raw: &str) -> Option<Self> {
        Self::parse(raw).ok()
    }

    /// Whether `value` is a well-formed address (no trimming).
    pub fn is_valid(value: &str) -> bool {
        let Some((local, _)) = value.rsplit_once('@') else {
            return false;
        };
        value.len() <= MAX_LENGTH
            && local.len() <= MAX_LOCAL_LENGTH
            && !local.starts_with('.')
            && !local.ends_with('.')
            && !local.contains("..")
            && EMAIL_REGEX.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form of the address.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    /// Part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Email::parse(s)
    }
}

impl TryFrom<&str> for Email {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self> {
        Email::parse(value)
    }
}

impl TryFrom<String> for Email {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Email::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
