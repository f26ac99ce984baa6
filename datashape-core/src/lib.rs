//! Core value types for datashape.
//!
//! - [`FieldValue`]: dynamically typed value returned by accessors and
//!   stored in field bags, with strict equality
//! - [`Accessors`]: `get_<field>` / `is_<field>` accessors with a fixed,
//!   per-type method set
//! - [`FieldBag`] and [`Field`]: keyed field store with typed keys
//! - [`Email`]: validating email address wrapper
//!
//! # Examples
//!
//! ```
//! use datashape_core::prelude::*;
//!
//! let bag = FieldBag::new().with("active", true).with("name", "ops");
//!
//! assert_eq!(bag.call("is_active"), Some(FieldValue::Bool(true)));
//! assert_eq!(bag.call("get_name"), Some(FieldValue::from("ops")));
//! ```

pub mod accessor;
pub mod bag;
pub mod email;
pub mod error;
pub mod value;

pub use accessor::{AccessorKind, Accessors};
pub use bag::{Field, FieldBag, HasFieldBag};
pub use email::Email;
pub use error::CoreError;
pub use value::{FieldValue, FromFieldValue};

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::accessor::{AccessorKind, Accessors};
    pub use crate::bag::{Field, FieldBag, HasFieldBag};
    pub use crate::email::Email;
    pub use crate::error::CoreError;
    pub use crate::value::{FieldValue, FromFieldValue};
}
