// Typed datashape settings

use crate::{ConfigManager, ConfigValidator, Result, Validate};
use datashape_i18n::{I18n, Locale};
use datashape_log::debug;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DATE_FORMAT: &str = "Y-m-d";
pub const DEFAULT_DATE_TIME_FORMAT: &str = "Y-m-d H:i:s";

/// Environment prefix read by [`Settings::from_env`].
pub const ENV_PREFIX: &str = "DATASHAPE";

/// Settings shared by the validation engine.
///
/// Date formats use the `Y-m-d H:i:s` token language or a `%`-style
/// strftime pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Locale used for validation messages
    pub locale: String,
    /// Locale tried when a message is missing in `locale`
    pub fallback_locale: String,
    /// Root of `<locale>/<source>.json` message catalogs
    pub messages_dir: Option<PathBuf>,
    /// Default format for date filters
    pub date_format: String,
    /// Default format for date-time filters
    pub date_time_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            fallback_locale: "en".to_string(),
            messages_dir: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from a manager; missing keys keep their defaults.
    pub fn from_manager(manager: &ConfigManager) -> Result<Self> {
        let defaults = Settings::default();

        let settings = Settings {
            locale: manager.get_or("locale", defaults.locale),
            fallback_locale: manager.get_or("fallback_locale", defaults.fallback_locale),
            messages_dir: manager.get_or("messages_dir", defaults.messages_dir),
            date_format: manager.get_or("date_format", defaults.date_format),
            date_time_format: manager.get_or("date_time_format", defaults.date_time_format),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Read `DATASHAPE_*` variables (after loading `.env` if present).
    pub fn from_env() -> Result<Self> {
        let manager = ConfigManager::with_prefix(ENV_PREFIX);
        manager.load_dotenv(None)?;
        Self::from_manager(&manager)
    }

    pub fn locale(&self) -> Result<Locale> {
        ConfigValidator::is_locale(&self.locale, "locale")
    }

    pub fn fallback_locale(&self) -> Result<Locale> {
        ConfigValidator::is_locale(&self.fallback_locale, "fallback_locale")
    }

    /// Message catalog configured with these locales and catalog root.
    pub fn build_i18n(&self) -> Result<I18n> {
        let mut i18n = I18n::new()
            .with_default_locale(self.locale()?)
            .with_fallback(self.fallback_locale()?);

        if let Some(dir) = &self.messages_dir {
            i18n = i18n.with_catalog_root(dir.clone());
        }

        debug!(target: "datashape::config", "message catalog configured";
            locale = self.locale, fallback = self.fallback_locale);

        Ok(i18n)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        self.locale()?;
        self.fallback_locale()?;
        ConfigValidator::not_empty(&self.date_format, "date_format")?;
        ConfigValidator::not_empty(&self.date_time_format, "date_time_format")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.date_format, "Y-m-d");
        assert_eq!(settings.date_time_format, "Y-m-d H:i:s");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_manager_overrides() {
        let manager = ConfigManager::new();
        manager.set("locale", "ru").unwrap();
        manager.set("date_format", "d.m.Y").unwrap();

        let settings = Settings::from_manager(&manager).unwrap();
        assert_eq!(settings.locale, "ru");
        assert_eq!(settings.fallback_locale, "en");
        assert_eq!(settings.date_format, "d.m.Y");
    }

    #[test]
    fn test_invalid_locale_is_rejected() {
        let manager = ConfigManager::new();
        manager.set("locale", "not a locale").unwrap();
        assert!(Settings::from_manager(&manager).is_err());
    }

    #[test]
    fn test_build_i18n() {
        let settings = Settings {
            locale: "ru".to_string(),
            ..Settings::default()
        };
        let i18n = settings.build_i18n().unwrap();
        assert_eq!(i18n.default_locale(), &Locale::ru());
    }
}
