//! Filtering and lookup over collections.

use crate::policy::AdmissionPolicy;
use crate::{CollectionError, Key, Result, TypedCollection};
use datashape_core::accessor::{AccessorKind, resolve_accessor};
use datashape_core::{Accessors, FieldValue};
use datashape_log::debug;

impl<P: AdmissionPolicy> TypedCollection<P>
where
    P::Item: Clone,
{
    /// Elements matching `predicate`, as a new collection of the same
    /// variant. Positional keys are renumbered from zero.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&P::Item) -> bool,
    {
        self.filter_with_key(|item, _| predicate(item))
    }

    /// Elements whose key matches `predicate`.
    pub fn filter_keys<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Key) -> bool,
    {
        self.filter_with_key(|_, key| predicate(key))
    }

    /// Elements for which `predicate(element, key)` holds.
    pub fn filter_with_key<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&P::Item, &Key) -> bool,
    {
        let mut filtered = Self::new();
        for (key, item) in self.entries() {
            if predicate(item, key) {
                filtered.push_admitted(item.clone());
            }
        }
        filtered
    }
}

impl<P: AdmissionPolicy> TypedCollection<P> {
    /// First element matching `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<&P::Item>
    where
        F: FnMut(&P::Item) -> bool,
    {
        self.iter().find(|item| predicate(item))
    }

    /// First `(element, key)` pair matching `predicate`.
    pub fn find_with_key<F>(&self, mut predicate: F) -> Option<(&P::Item, &Key)>
    where
        F: FnMut(&P::Item, &Key) -> bool,
    {
        self.entries()
            .find(|(key, item)| predicate(item, key))
            .map(|(key, item)| (item, key))
    }
}

impl<P: AdmissionPolicy> TypedCollection<P>
where
    P::Item: Accessors + Clone,
{
    /// Elements whose `field` accessor returns exactly `value`.
    ///
    /// Boolean values compare through `is_<field>` when the element type
    /// has it and `get_<field>` otherwise; other values use `get_<field>`.
    /// The accessor is resolved against the element type, so an empty
    /// collection still reports a missing accessor.
    ///
    /// ```
    /// use datashape_collection::Collection;
    /// use datashape_core::{bag_accessors, FieldBag, HasFieldBag};
    ///
    /// #[derive(Clone)]
    /// struct User(FieldBag);
    ///
    /// impl HasFieldBag for User {
    ///     fn field_bag(&self) -> &FieldBag {
    ///         &self.0
    ///     }
    /// }
    ///
    /// bag_accessors!(User { name, active });
    ///
    /// let users: Collection<User> = [
    ///     User(FieldBag::new().with("name", "ann").with("active", true)),
    ///     User(FieldBag::new().with("name", "bob").with("active", false)),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let active = users.with("active", true).unwrap();
    /// assert_eq!(active.len(), 1);
    /// assert!(users.with("email", "x").is_err());
    /// ```
    pub fn with(&self, field: &str, value: impl Into<FieldValue>) -> Result<Self> {
        let value = value.into();
        let boolean = matches!(value, FieldValue::Bool(_));

        let Some(method) = resolve_accessor::<P::Item>(field, boolean) else {
            let method = AccessorKind::Get.method_for(field);
            debug!(target: "datashape::collection", "accessor not found";
                collection = P::NAME, method = method);
            return Err(CollectionError::MethodNotFound {
                method,
                type_name: std::any::type_name::<P::Item>(),
            });
        };

        Ok(self.filter(|item| item.call(&method).as_ref() == Some(&value)))
    }
}
