// Configuration validation

use crate::{ConfigError, Result};
use datashape_i18n::Locale;

/// Implemented by configuration structs that can check themselves.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Field checks shared by configuration structs.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// The value must parse as a locale tag.
    pub fn is_locale(value: &str, field: &str) -> Result<Locale> {
        Locale::parse(value).map_err(|_| {
            ConfigError::ValidationError(format!("{} must be a locale tag, got \"{}\"", field, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty_validation() {
        assert!(ConfigValidator::not_empty("Y-m-d", "date_format").is_ok());
        assert!(ConfigValidator::not_empty("  ", "date_format").is_err());
    }

    #[test]
    fn test_locale_validation() {
        assert_eq!(ConfigValidator::is_locale("ru_RU", "locale").unwrap().tag(), "ru-RU");
        let err = ConfigValidator::is_locale("russian", "locale").unwrap_err();
        assert!(err.to_string().contains("locale"));
    }
}
