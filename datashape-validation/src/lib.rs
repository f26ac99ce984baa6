//! Request filtering and validation for datashape.
//!
//! Provides pure coercion filters for raw input, strict date and interval
//! parsing, and a required-field validator that collects every violation
//! into an ordered [`ValidationResult`].
//!
//! # Examples
//!
//! ## Filtering raw input
//!
//! ```
//! use datashape_validation::{filter_boolean, filter_float, filter_integer, filter_positive_integer};
//! use serde_json::json;
//!
//! assert_eq!(filter_integer(&json!("42")), Some(42));
//! assert_eq!(filter_integer(&json!("4.2")), None);
//! assert_eq!(filter_positive_integer(&json!("0")), None);
//! assert_eq!(filter_float(&json!("3,14")), Some(3.14));
//! assert!(filter_boolean(&json!("on")));
//! assert!(!filter_boolean(&json!("off")));
//! ```
//!
//! ## Required fields
//!
//! ```
//! use datashape_validation::{FieldDescriptor, FieldPresence, Request, RequestSchema};
//!
//! struct Login {
//!     email: Option<String>,
//!     password: Option<String>,
//! }
//!
//! impl Request for Login {
//!     fn schema() -> RequestSchema {
//!         RequestSchema::new()
//!             .field(FieldDescriptor::required("email"))
//!             .field(FieldDescriptor::required("password"))
//!     }
//!
//!     fn is_missing(&self, field: &str) -> bool {
//!         match field {
//!             "email" => self.email.is_missing(),
//!             "password" => self.password.is_missing(),
//!             _ => false,
//!         }
//!     }
//! }
//!
//! let login = Login {
//!     email: Some("a@b.co".to_string()),
//!     password: None,
//! };
//!
//! let result = login.validate();
//! assert_eq!(result.len(), 1);
//! assert_eq!(result.errors()[0].property(), Some("password"));
//! assert_eq!(result.errors()[0].code, "required");
//! ```

mod date_format;
mod errors;
mod filters;
mod interval;
mod localizer;
mod request;
mod validator;

pub use date_format::DateFormat;
pub use errors::*;
pub use filters::*;
pub use interval::Interval;
pub use localizer::{FIELD_REQUIRED, FIELD_WITH_KEY_REQUIRED, Localizer, NoMessages};
pub use request::{FieldDescriptor, FieldPresence, Request, RequestSchema};
pub use validator::RequiredFieldValidator;
