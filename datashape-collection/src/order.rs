//! Multi-column ordering for collections of accessor-bearing elements.
//!
//! Orderings use a small shorthand: a bare column name sorts ascending,
//! and a `{column: directions}` entry sets the direction. Directions are
//! case-insensitive and may be comma-joined (`"desc, asc"`); the first one
//! wins. A column with an unrecognised direction token, or with no
//! directions at all, is dropped.

use crate::policy::AdmissionPolicy;
use crate::{CollectionError, Result, TypedCollection};
use datashape_core::accessor::AccessorKind;
use datashape_core::{Accessors, FieldValue};
use datashape_log::{debug, trace};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Parse a direction list such as `"DESC"` or `"asc, desc"`.
    pub fn parse_list(raw: &str) -> Option<Direction> {
        let mut first = None;
        for token in raw.split(',') {
            let direction = match token.trim().to_uppercase().as_str() {
                "ASC" => Direction::Asc,
                "DESC" => Direction::Desc,
                _ => return None,
            };
            first.get_or_insert(direction);
        }
        first
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("ASC"),
            Direction::Desc => f.write_str("DESC"),
        }
    }
}

/// Ordered list of `(column, direction)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderSpec {
    columns: Vec<(String, Direction)>,
}

impl OrderSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ascending column.
    pub fn asc(self, column: impl Into<String>) -> Self {
        self.then(column, Direction::Asc)
    }

    /// Append a descending column.
    pub fn desc(self, column: impl Into<String>) -> Self {
        self.then(column, Direction::Desc)
    }

    /// Append a column; a repeated column keeps its first position and
    /// takes the new direction.
    pub fn then(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.push(column.into(), direction);
        self
    }

    /// Append a column with a raw direction list. Dropped when the list
    /// does not parse.
    pub fn directed(mut self, column: impl Into<String>, directions: &str) -> Self {
        let column = column.into();
        match Direction::parse_list(directions) {
            Some(direction) => self.push(column, direction),
            None => {
                trace!(target: "datashape::collection", "order column skipped";
                    column = column, directions = directions);
            }
        }
        self
    }

    /// Parse the shorthand from JSON.
    ///
    /// Accepts a column name, an object of `column: directions`, or an
    /// array mixing both.
    ///
    /// ```
    /// use datashape_collection::{Direction, OrderSpec};
    /// use serde_json::json;
    ///
    /// let spec = OrderSpec::from_json(&json!(["name", {"age": "desc", "id": "sideways"}]));
    /// assert_eq!(
    ///     spec.columns(),
    ///     &[("name".to_string(), Direction::Asc), ("age".to_string(), Direction::Desc)]
    /// );
    /// ```
    pub fn from_json(value: &Value) -> Self {
        let mut spec = Self::new();
        spec.extend_json(value);
        spec
    }

    fn extend_json(&mut self, value: &Value) {
        match value {
            Value::String(column) => self.push(column.clone(), Direction::Asc),
            Value::Array(items) => {
                for item in items {
                    self.extend_json(item);
                }
            }
            Value::Object(map) => {
                for (column, directions) in map {
                    let parsed = directions.as_str().and_then(Direction::parse_list);
                    match parsed {
                        Some(direction) => self.push(column.clone(), direction),
                        None => {
                            trace!(target: "datashape::collection", "order column skipped";
                                column = column, directions = directions);
                        }
                    }
                }
            }
            other => {
                trace!(target: "datashape::collection", "order entry ignored"; entry = other);
            }
        }
    }

    fn push(&mut self, column: String, direction: Direction) {
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some(existing) => existing.1 = direction,
            None => self.columns.push((column, direction)),
        }
    }

    pub fn columns(&self) -> &[(String, Direction)] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Compare two elements accessor by accessor.
fn compare_by<T: Accessors>(methods: &[(String, Direction)], a: &T, b: &T) -> Ordering {
    methods
        .iter()
        .map(|(method, direction)| {
            let left = a.call(method).unwrap_or(FieldValue::Null);
            let right = b.call(method).unwrap_or(FieldValue::Null);
            direction.apply(left.sort_cmp(&right))
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl<P: AdmissionPolicy> TypedCollection<P>
where
    P::Item: Accessors,
{
    /// Stable in-place sort by `spec`, reading each column through its
    /// `get_<column>` accessor. Keys stay attached to their elements.
    pub fn sort_by_order(&mut self, spec: &OrderSpec) -> Result<()> {
        let mut methods = Vec::with_capacity(spec.columns.len());
        for (column, direction) in &spec.columns {
            let method = AccessorKind::Get.method_for(column);
            if !P::Item::responds_to(&method) {
                debug!(target: "datashape::collection", "accessor not found";
                    collection = P::NAME, method = method);
                return Err(CollectionError::MethodNotFound {
                    method,
                    type_name: std::any::type_name::<P::Item>(),
                });
            }
            methods.push((method, *direction));
        }

        if methods.is_empty() {
            return Ok(());
        }

        let mut entries = self.take_entries();
        entries.sort_by(|(_, a), (_, b)| compare_by(&methods, a, b));
        self.reorder(entries);
        Ok(())
    }

    /// Stable in-place sort with a custom comparator.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&P::Item, &P::Item) -> Ordering,
    {
        let mut entries = self.take_entries();
        entries.sort_by(|(_, a), (_, b)| compare(a, b));
        self.reorder(entries);
    }
}
