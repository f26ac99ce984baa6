//! Typed accessors resolved by name.
//!
//! An accessor is a `get_<field>` or `is_<field>` method exposed by a type.
//! The set of accessors is fixed per type and known at compile time; it is
//! usually generated with `#[derive(Accessors)]` or [`bag_accessors!`].
//!
//! [`bag_accessors!`]: crate::bag_accessors

use crate::FieldValue;

/// Read-only accessors addressed by method name.
pub trait Accessors {
    /// Whether every value of this type exposes `method`.
    fn responds_to(method: &str) -> bool
    where
        Self: Sized;

    /// Invoke `method`. `None` when the type has no such accessor.
    fn call(&self, method: &str) -> Option<FieldValue>;
}

impl<T: Accessors> Accessors for Box<T> {
    fn responds_to(method: &str) -> bool {
        T::responds_to(method)
    }

    fn call(&self, method: &str) -> Option<FieldValue> {
        (**self).call(method)
    }
}

impl<T: Accessors> Accessors for std::sync::Arc<T> {
    fn responds_to(method: &str) -> bool {
        T::responds_to(method)
    }

    fn call(&self, method: &str) -> Option<FieldValue> {
        (**self).call(method)
    }
}

/// Accessor prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    /// `get_<field>`: the stored value
    Get,
    /// `is_<field>`: the stored value coerced to a boolean
    Is,
}

impl AccessorKind {
    pub fn prefix(self) -> &'static str {
        match self {
            AccessorKind::Get => "get_",
            AccessorKind::Is => "is_",
        }
    }

    /// Method name for `field`: `Get` + `"firstName"` gives `"get_first_name"`.
    pub fn method_for(self, field: &str) -> String {
        format!("{}{}", self.prefix(), to_snake_case(field))
    }
}

/// Split an accessor method name into its kind and snake_case field key.
///
/// ```
/// use datashape_core::accessor::{parse_accessor, AccessorKind};
///
/// assert_eq!(parse_accessor("get_first_name"), Some((AccessorKind::Get, "first_name".to_string())));
/// assert_eq!(parse_accessor("isActive"), Some((AccessorKind::Is, "active".to_string())));
/// assert_eq!(parse_accessor("set_name"), None);
/// ```
pub fn parse_accessor(method: &str) -> Option<(AccessorKind, String)> {
    let snake = to_snake_case(method);
    [AccessorKind::Get, AccessorKind::Is]
        .into_iter()
        .find_map(|kind| {
            snake
                .strip_prefix(kind.prefix())
                .filter(|rest| !rest.is_empty())
                .map(|rest| (kind, rest.to_string()))
        })
}

/// Pick the accessor used to compare `field` against a value.
///
/// Boolean comparisons prefer `is_<field>` and fall back to `get_<field>`;
/// everything else uses `get_<field>`. `None` when `T` exposes neither.
pub fn resolve_accessor<T: Accessors>(field: &str, boolean: bool) -> Option<String> {
    let candidates: &[AccessorKind] = if boolean {
        &[AccessorKind::Is, AccessorKind::Get]
    } else {
        &[AccessorKind::Get]
    };

    candidates
        .iter()
        .map(|kind| kind.method_for(field))
        .find(|method| T::responds_to(method))
}

/// Normalize `camelCase`, `PascalCase` and `snake_case` names to snake_case.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;

    for ch in name.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
            out.push(ch);
        }
    }

    out
}
