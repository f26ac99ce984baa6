//! Dynamically typed field values.

use crate::Email;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A value read from a field store or returned by an accessor.
///
/// Equality is strict: `Int(1)` and `Float(1.0)` are different values, as
/// are `Int(1)` and `Bool(true)`.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent value
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Whether the value is [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Loose boolean coercion.
    ///
    /// Null, `false`, `0`, `0.0`, `""`, `"0"` and empty lists or maps are
    /// false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Int(i) => *i != 0,
            FieldValue::Float(f) => *f != 0.0,
            FieldValue::Str(s) => !s.is_empty() && s != "0",
            FieldValue::Date(_) | FieldValue::DateTime(_) => true,
            FieldValue::List(items) => !items.is_empty(),
            FieldValue::Map(map) => !map.is_empty(),
        }
    }

    /// String slice for `Str` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Int(_) | FieldValue::Float(_) => 2,
            FieldValue::Str(_) => 3,
            FieldValue::Date(_) => 4,
            FieldValue::DateTime(_) => 5,
            FieldValue::List(_) => 6,
            FieldValue::Map(_) => 7,
        }
    }

    /// Total order used for sorting.
    ///
    /// Values of different kinds order by kind (null first); integers and
    /// floats compare numerically with each other.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;

        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Str(a), Str(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (List(a), List(b)) => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.sort_cmp(y))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (Map(a), Map(b)) => a.len().cmp(&b.len()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

macro_rules! int_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Int(i64::from(value))
                }
            }
        )*
    };
}

int_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(FieldValue::Int)
            .unwrap_or(FieldValue::Float(value as f64))
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::from(value as u64)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(f64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Str(value.hyphenated().to_string())
    }
}

impl From<Email> for FieldValue {
    fn from(value: Email) -> Self {
        FieldValue::Str(value.into_inner())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(value: Vec<T>) -> Self {
        FieldValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| n.as_f64().map(FieldValue::Float))
                .unwrap_or(FieldValue::Null),
            Value::String(s) => FieldValue::Str(s),
            Value::Array(items) => FieldValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                FieldValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Typed extraction from a [`FieldValue`].
pub trait FromFieldValue: Sized {
    /// Convert, or `None` when the value has another shape.
    fn from_field_value(value: &FieldValue) -> Option<Self>;
}

impl FromFieldValue for FieldValue {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromFieldValue for bool {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromFieldValue for i64 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromFieldValue for NaiveDate {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl FromFieldValue for NaiveDateTime {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl FromFieldValue for Uuid {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value.as_str().and_then(|s| Uuid::try_parse(s).ok())
    }
}

impl FromFieldValue for Email {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        value.as_str().and_then(Email::try_from_raw)
    }
}

impl<T: FromFieldValue> FromFieldValue for Vec<T> {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::List(items) => items.iter().map(T::from_field_value).collect(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_equality() {
        assert_ne!(FieldValue::Int(1), FieldValue::Float(1.0));
        assert_ne!(FieldValue::Int(1), FieldValue::Bool(true));
        assert_eq!(FieldValue::from("a"), FieldValue::Str("a".to_string()));
    }

    #[test]
    fn test_truthiness() {
        assert!(!FieldValue::Null.is_truthy());
        assert!(!FieldValue::Str("0".into()).is_truthy());
        assert!(!FieldValue::Str(String::new()).is_truthy());
        assert!(!FieldValue::List(vec![]).is_truthy());
        assert!(FieldValue::Str("no".into()).is_truthy());
        assert!(FieldValue::Int(-1).is_truthy());
    }

    #[test]
    fn test_from_json() {
        let value = FieldValue::from(json!({"ids": [1, 2.5], "name": null}));
        let FieldValue::Map(map) = value else {
            panic!("expected map");
        };
        assert_eq!(
            map["ids"],
            FieldValue::List(vec![FieldValue::Int(1), FieldValue::Float(2.5)])
        );
        assert_eq!(map["name"], FieldValue::Null);
    }

    #[test]
    fn test_option_and_uuid_conversions() {
        assert_eq!(FieldValue::from(None::<i32>), FieldValue::Null);
        let id = Uuid::nil();
        assert_eq!(
            FieldValue::from(id),
            FieldValue::Str("00000000-0000-0000-0000-000000000000".into())
        );
        assert_eq!(Uuid::from_field_value(&FieldValue::from(id)), Some(id));
    }

    #[test]
    fn test_sort_cmp_mixes_numbers() {
        assert_eq!(FieldValue::Int(2).sort_cmp(&FieldValue::Float(1.5)), Ordering::Greater);
        assert_eq!(FieldValue::Null.sort_cmp(&FieldValue::Int(0)), Ordering::Less);
        assert_eq!(
            FieldValue::from("apple").sort_cmp(&FieldValue::from("banana")),
            Ordering::Less
        );
    }

    #[test]
    fn test_typed_extraction() {
        assert_eq!(f64::from_field_value(&FieldValue::Int(3)), Some(3.0));
        assert_eq!(i64::from_field_value(&FieldValue::Float(3.0)), None);
        assert_eq!(
            Vec::<i64>::from_field_value(&FieldValue::from(vec![1i64, 2])),
            Some(vec![1, 2])
        );
    }
}
