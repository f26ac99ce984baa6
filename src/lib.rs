// Datashape - typed collections and request validation for Rust
//
// This library provides admission-checked collections, typed accessors,
// pure input filters and a required-field validator for request objects.

// Re-export core functionality
pub use datashape_core::*;

// Re-export procedural macros
pub use datashape_macro::{Accessors, Request};

// Re-export logging
pub use datashape_log;

// Re-export optional crates
#[cfg(feature = "collection")]
pub use datashape_collection;

#[cfg(feature = "validation")]
pub use datashape_validation;

#[cfg(feature = "config")]
pub use datashape_config;

#[cfg(feature = "i18n")]
pub use datashape_i18n;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Accessors, Email, Field, FieldBag, FieldValue, FromFieldValue, HasFieldBag, Request,
        bag_accessors,
    };

    #[cfg(feature = "collection")]
    pub use datashape_collection::{
        Collection, CollectionError, Cursor, Direction, EmailCollection, Key,
        NumericIdCollection, OrderSpec, TypedCollection, UuidCollection,
    };

    #[cfg(feature = "validation")]
    pub use datashape_validation::{
        FieldDescriptor, FieldPresence, FilterSet, Localizer, NoMessages, Request, RequestSchema,
        RequiredFieldValidator, ValidationError, ValidationResult,
    };

    #[cfg(feature = "config")]
    pub use datashape_config::{ConfigManager, Settings};

    #[cfg(feature = "i18n")]
    pub use datashape_i18n::{I18n, Locale};
}
