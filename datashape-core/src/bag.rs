//! Keyed field store with typed keys and generated accessors.

use crate::accessor::{AccessorKind, parse_accessor, to_snake_case};
use crate::{Accessors, CoreError, FieldValue, FromFieldValue, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// A typed key into a [`FieldBag`].
///
/// ```
/// use datashape_core::{Field, FieldBag};
///
/// const NAME: Field<String> = Field::new("name");
/// const AGE: Field<i64> = Field::new("age");
///
/// let mut bag = FieldBag::new();
/// bag.put(&NAME, "Ada".to_string());
/// bag.put(&AGE, 36);
///
/// assert_eq!(bag.get(&NAME).as_deref(), Some("Ada"));
/// assert_eq!(bag.get(&AGE), Some(36));
/// ```
pub struct Field<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Field<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

/// String-keyed field values.
///
/// Keys are normalized to snake_case, so `"firstName"` and `"first_name"`
/// address the same slot. Missing keys read as [`FieldValue::Null`] through
/// accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldBag {
    values: BTreeMap<String, FieldValue>,
}

impl FieldBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            Value::Null => Err(CoreError::NotAnObject("null")),
            Value::Bool(_) => Err(CoreError::NotAnObject("boolean")),
            Value::Number(_) => Err(CoreError::NotAnObject("number")),
            Value::String(_) => Err(CoreError::NotAnObject("string")),
            Value::Array(_) => Err(CoreError::NotAnObject("array")),
        }
    }

    /// Builder-style [`FieldBag::set`].
    pub fn with(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Store a value, returning the previous one.
    pub fn set(&mut self, key: &str, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(to_snake_case(key), value.into())
    }

    /// Store a value under a typed key.
    pub fn put<T: Into<FieldValue>>(&mut self, field: &Field<T>, value: T) {
        self.set(field.name, value);
    }

    /// Read a value under a typed key; `None` when absent or of another shape.
    pub fn get<T: FromFieldValue>(&self, field: &Field<T>) -> Option<T> {
        self.get_raw(field.name).and_then(T::from_field_value)
    }

    pub fn get_raw(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(&to_snake_case(key))
    }

    /// Value at `key` coerced to a boolean; absent keys are false.
    pub fn is(&self, key: &str) -> bool {
        self.get_raw(key).is_some_and(FieldValue::is_truthy)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(&to_snake_case(key))
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.values.remove(&to_snake_case(key))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Accessor read: `Get` yields the stored value (or null), `Is` its truthiness.
    pub fn read(&self, kind: AccessorKind, key: &str) -> FieldValue {
        match kind {
            AccessorKind::Get => self.get_raw(key).cloned().unwrap_or_default(),
            AccessorKind::Is => FieldValue::Bool(self.is(key)),
        }
    }
}

impl<K: AsRef<str>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = FieldBag::new();
        for (key, value) in iter {
            bag.set(key.as_ref(), value);
        }
        bag
    }
}

/// Types that keep their data in a [`FieldBag`].
pub trait HasFieldBag {
    fn field_bag(&self) -> &FieldBag;
}

impl HasFieldBag for FieldBag {
    fn field_bag(&self) -> &FieldBag {
        self
    }
}

/// A bare bag answers every well-formed accessor; unknown keys read as null.
impl Accessors for FieldBag {
    fn responds_to(method: &str) -> bool {
        parse_accessor(method).is_some()
    }

    fn call(&self, method: &str) -> Option<FieldValue> {
        let (kind, key) = parse_accessor(method)?;
        Some(self.read(kind, &key))
    }
}

/// Implement [`Accessors`] for a type holding a [`FieldBag`], exposing
/// `get_<field>` and `is_<field>` for each listed field.
///
/// ```
/// use datashape_core::{bag_accessors, Accessors, FieldBag, FieldValue, HasFieldBag};
///
/// struct Profile {
///     fields: FieldBag,
/// }
///
/// impl HasFieldBag for Profile {
///     fn field_bag(&self) -> &FieldBag {
///         &self.fields
///     }
/// }
///
/// bag_accessors!(Profile { first_name, active });
///
/// let profile = Profile {
///     fields: FieldBag::new().with("firstName", "Ada").with("active", 1),
/// };
///
/// assert!(Profile::responds_to("get_first_name"));
/// assert!(!Profile::responds_to("get_last_name"));
/// assert_eq!(profile.call("is_active"), Some(FieldValue::Bool(true)));
/// assert_eq!(profile.call("get_first_name"), Some(FieldValue::from("Ada")));
/// ```
#[macro_export]
macro_rules! bag_accessors {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Accessors for $ty {
            fn responds_to(method: &str) -> bool {
                const FIELDS: &[&str] = &[$(stringify!($field)),*];
                $crate::accessor::parse_accessor(method)
                    .is_some_and(|(_, key)| FIELDS.contains(&key.as_str()))
            }

            fn call(&self, method: &str) -> ::std::option::Option<$crate::FieldValue> {
                if !<Self as $crate::Accessors>::responds_to(method) {
                    return ::std::option::Option::None;
                }
                let (kind, key) = $crate::accessor::parse_accessor(method)?;
                ::std::option::Option::Some($crate::HasFieldBag::field_bag(self).read(kind, &key))
            }
        }
    };
}
