//! Message catalogs for datashape
//!
//! Provides the localization side of request validation:
//!
//! - **Locales**: BCP 47 tags with region fallback
//! - **Bundles**: JSON message files, nested keys flattened with dots
//! - **Sources**: per-source catalogs loaded lazily from a directory tree
//! - **Substitution**: `{name}` placeholders
//!
//! # Quick Start
//!
//! ```rust
//! use datashape_i18n::{I18n, Locale, MessageBundle};
//!
//! let i18n = I18n::new().with_default_locale(Locale::en());
//!
//! let mut en = MessageBundle::new();
//! en.add("request.field_with_key_required", "Field {key} is required");
//! i18n.add_bundle(&Locale::en(), en);
//!
//! let msg = i18n.format(
//!     "request.field_with_key_required",
//!     &Locale::en(),
//!     &[("key", "E-mail")],
//! );
//! assert_eq!(msg.as_deref(), Some("Field E-mail is required"));
//! ```

mod error;
mod locale;
mod messages;

pub use error::I18nError;
pub use locale::Locale;
pub use messages::{I18n, MessageBundle, Messages};

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{I18n, I18nError, Locale, MessageBundle, Result};
}
