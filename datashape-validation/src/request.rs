// Request schemas and field emptiness

use crate::{Localizer, NoMessages, RequiredFieldValidator, ValidationResult};
use chrono::{NaiveDate, NaiveDateTime};
use datashape_core::{Email, FieldBag, FieldValue};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

/// One declared request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    required: bool,
    key: Option<String>,
    code: Option<String>,
}

impl FieldDescriptor {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            key: None,
            code: None,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name)
        }
    }

    /// Descriptive key used in the with-key message.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Fixed error code replacing `"required"`.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// Ordered field declarations of a request type.
///
/// ```
/// use datashape_validation::{FieldDescriptor, RequestSchema};
///
/// let schema = RequestSchema::new()
///     .with_source("profile")
///     .field(FieldDescriptor::required("email").with_key("E-mail"))
///     .field(FieldDescriptor::optional("nickname"));
///
/// assert_eq!(schema.required_fields().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSchema {
    source: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl RequestSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message catalog source loaded before validation.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_required())
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A constructed, immutable request whose required fields can be checked.
///
/// Usually derived with `#[derive(Request)]`.
pub trait Request {
    /// Declared fields in declaration order.
    fn schema() -> RequestSchema
    where
        Self: Sized;

    /// Whether the value of `field` counts as absent.
    fn is_missing(&self, field: &str) -> bool;

    /// Per-instance error code for `field`, overriding the schema.
    fn error_code_for(&self, _field: &str) -> Option<String> {
        None
    }

    /// Check required fields with built-in messages.
    fn validate(&self) -> ValidationResult
    where
        Self: Sized,
    {
        RequiredFieldValidator::new(&NoMessages).validate(self)
    }

    /// Check required fields with localized messages.
    fn validate_with(&self, localizer: &dyn Localizer) -> ValidationResult
    where
        Self: Sized,
    {
        RequiredFieldValidator::new(localizer).validate(self)
    }
}

/// Emptiness of a field value.
///
/// Only absent values (`None`, JSON null) and empty sequences or maps are
/// missing. `0`, `false` and `""` are present.
pub trait FieldPresence {
    fn is_missing(&self) -> bool;
}

macro_rules! always_present {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldPresence for $ty {
                fn is_missing(&self) -> bool {
                    false
                }
            }
        )*
    };
}

always_present!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, str, Email, Uuid, NaiveDate, NaiveDateTime,
);

macro_rules! present_unless_empty {
    ($($ty:ident<$($param:ident),+>),* $(,)?) => {
        $(
            impl<$($param),+> FieldPresence for $ty<$($param),+> {
                fn is_missing(&self) -> bool {
                    self.is_empty()
                }
            }
        )*
    };
}

present_unless_empty!(Vec<T>, VecDeque<T>, BTreeSet<T>, HashSet<T>, BTreeMap<K, V>, HashMap<K, V>);

impl<T> FieldPresence for [T] {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T> FieldPresence for Option<T> {
    fn is_missing(&self) -> bool {
        self.is_none()
    }
}

impl<T: FieldPresence + ?Sized> FieldPresence for &T {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

impl<T: FieldPresence + ?Sized> FieldPresence for Box<T> {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

impl<T: FieldPresence + ?Sized> FieldPresence for Rc<T> {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

impl<T: FieldPresence + ?Sized> FieldPresence for Arc<T> {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

impl FieldPresence for serde_json::Value {
    fn is_missing(&self) -> bool {
        use serde_json::Value;

        match self {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

impl FieldPresence for FieldValue {
    fn is_missing(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Map(map) => map.is_empty(),
            _ => false,
        }
    }
}

impl FieldPresence for FieldBag {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_absent_and_empty_sequences_are_missing() {
        assert!(None::<String>.is_missing());
        assert!(Vec::<i32>::new().is_missing());
        assert!(HashMap::<String, i32>::new().is_missing());
        assert!(json!(null).is_missing());
        assert!(json!([]).is_missing());

        assert!(!Some(0).is_missing());
        assert!(!Some(false).is_missing());
        assert!(!Some(String::new()).is_missing());
        assert!(!0i64.is_missing());
        assert!(!json!("").is_missing());
        assert!(!vec![0].is_missing());
    }

    #[test]
    fn test_nested_option_is_present_when_outer_is_some() {
        let value: Option<Vec<i32>> = Some(Vec::new());
        assert!(!value.is_missing());
    }

    #[test]
    fn test_schema_lookup() {
        let schema = RequestSchema::new()
            .field(FieldDescriptor::required("email").with_code("email_missing"))
            .field(FieldDescriptor::optional("comment"));

        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.get("email").and_then(FieldDescriptor::code), Some("email_missing"));
        assert!(!schema.get("comment").is_some_and(FieldDescriptor::is_required));
        assert!(schema.source().is_none());
    }
}
