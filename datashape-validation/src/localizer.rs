// Message lookup for validation errors

use datashape_i18n::I18n;
use datashape_log::warn;

/// Message for a missing required field.
pub const FIELD_REQUIRED: &str = "request.field_required";

/// Message for a missing required field that has a descriptive key; `{key}` is substituted.
pub const FIELD_WITH_KEY_REQUIRED: &str = "request.field_with_key_required";

/// Source of localized message templates.
pub trait Localizer {
    /// Make the messages of `source` available. Called before each pass.
    fn load_messages(&self, source: &str);

    /// Message for `key` with `{name}` placeholders filled from `args`.
    /// Missing or empty messages are `None`.
    fn message(&self, key: &str, args: &[(&str, &str)]) -> Option<String>;
}

/// Localizer without any messages; callers fall back to built-in text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMessages;

impl Localizer for NoMessages {
    fn load_messages(&self, _source: &str) {}

    fn message(&self, _key: &str, _args: &[(&str, &str)]) -> Option<String> {
        None
    }
}

impl Localizer for I18n {
    fn load_messages(&self, source: &str) {
        if let Err(e) = self.load_source(source) {
            warn!(target: "datashape::validation", "message source unavailable"; source = source, error = e);
        }
    }

    fn message(&self, key: &str, args: &[(&str, &str)]) -> Option<String> {
        self.format(key, self.default_locale(), args)
    }
}

impl<L: Localizer + ?Sized> Localizer for &L {
    fn load_messages(&self, source: &str) {
        (**self).load_messages(source)
    }

    fn message(&self, key: &str, args: &[(&str, &str)]) -> Option<String> {
        (**self).message(key, args)
    }
}
