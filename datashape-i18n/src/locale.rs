//! Locale identifiers used to pick message catalogs.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A locale (language plus optional script and region).
///
/// # Examples
///
/// ```
/// use datashape_i18n::Locale;
///
/// let ru = Locale::new("ru", None::<&str>);
/// let en_us: Locale = "en_US".parse().unwrap();
/// assert_eq!(en_us.tag(), "en-US");
/// assert_eq!(ru.tag(), "ru");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    /// Language code (ISO 639-1, e.g. "en", "ru")
    pub language: String,
    /// Optional script (e.g. "Latn", "Cyrl")
    pub script: Option<String>,
    /// Optional region code (ISO 3166-1, e.g. "US", "RU")
    pub region: Option<String>,
}

impl Locale {
    /// Create a new locale.
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            script: None,
            region: region.map(|r| r.into().to_uppercase()),
        }
    }

    /// Parse a BCP 47 tag. Both `-` and `_` separators are accepted.
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.trim().split(['-', '_']);

        let language = parts.next().unwrap_or_default().to_lowercase();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(I18nError::InvalidLocale(tag.to_string()));
        }

        let mut script = None;
        let mut region = None;

        for part in parts {
            let alphabetic = part.chars().all(|c| c.is_ascii_alphabetic());
            match part.len() {
                4 if alphabetic => {
                    let mut chars = part.chars();
                    script = chars.next().map(|first| {
                        first
                            .to_uppercase()
                            .chain(chars.flat_map(char::to_lowercase))
                            .collect()
                    });
                }
                2 if alphabetic => region = Some(part.to_uppercase()),
                3 if part.chars().all(|c| c.is_ascii_digit()) => region = Some(part.to_string()),
                _ => return Err(I18nError::InvalidLocale(tag.to_string())),
            }
        }

        Ok(Self {
            language,
            script,
            region,
        })
    }

    /// The language tag (e.g. "en-US").
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        for part in [&self.script, &self.region].into_iter().flatten() {
            tag.push('-');
            tag.push_str(part);
        }
        tag
    }

    /// Same locale without a region.
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            script: self.script.clone(),
            region: None,
        }
    }

    /// Lookup order for this locale: itself, then the region-less form.
    pub fn candidates(&self) -> Vec<Locale> {
        let mut candidates = vec![self.clone()];
        if self.region.is_some() {
            candidates.push(self.language_only());
        }
        candidates
    }

    /// English (no region)
    pub fn en() -> Self {
        Self::new("en", None::<&str>)
    }

    /// English (US)
    pub fn en_us() -> Self {
        Self::new("en", Some("US"))
    }

    /// Russian (no region)
    pub fn ru() -> Self {
        Self::new("ru", None::<&str>)
    }

    /// German (no region)
    pub fn de() -> Self {
        Self::new("de", None::<&str>)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = I18nError;

    fn try_from(value: String) -> Result<Self> {
        Locale::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        let en = Locale::parse("en").unwrap();
        assert_eq!(en.language, "en");
        assert!(en.region.is_none());

        let ru_ru = Locale::parse("ru_RU").unwrap();
        assert_eq!(ru_ru.language, "ru");
        assert_eq!(ru_ru.region.as_deref(), Some("RU"));

        let sr = Locale::parse("sr-cyrl-RS").unwrap();
        assert_eq!(sr.script.as_deref(), Some("Cyrl"));
        assert_eq!(sr.tag(), "sr-Cyrl-RS");
    }

    #[test]
    fn test_locale_parse_rejects_garbage() {
        assert!(Locale::parse("").is_err());
        assert!(Locale::parse("english").is_err());
        assert!(Locale::parse("en-toolongregion").is_err());
    }

    #[test]
    fn test_candidates_fall_back_to_language() {
        let tags: Vec<String> = Locale::en_us().candidates().iter().map(Locale::tag).collect();
        assert_eq!(tags, vec!["en-US", "en"]);
        assert_eq!(Locale::ru().candidates().len(), 1);
    }

    #[test]
    fn test_serde_as_tag() {
        let json = serde_json::to_string(&Locale::en_us()).unwrap();
        assert_eq!(json, "\"en-US\"");
        let back: Locale = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(back, Locale::de());
    }
}
