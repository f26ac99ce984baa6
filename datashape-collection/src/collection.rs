//! Ordered, policy-checked element storage.

use crate::policy::{
    AdmissionPolicy, ByEmail, ByPositiveId, ByUuid, KeyedPolicy, Positional, RawAdmission,
};
use crate::{Cursor, Key, Result};
use datashape_log::{debug, trace};
use datashape_validation::FieldPresence;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Any values, stored positionally.
pub type Collection<T> = TypedCollection<Positional<T>>;

/// Email addresses, deduplicated by lowercase address.
pub type EmailCollection = TypedCollection<ByEmail>;

/// Positive integer ids, deduplicated by value.
pub type NumericIdCollection = TypedCollection<ByPositiveId>;

/// UUIDs, deduplicated by hyphenated form.
pub type UuidCollection = TypedCollection<ByUuid>;

/// Ordered collection whose element type and admission rules come from a
/// policy `P`.
///
/// Elements keep insertion order. Each occupies a slot under a [`Key`]:
/// positional variants use the next free index, keyed variants the
/// element's natural key, so re-adding an element replaces it in place.
///
/// # Examples
///
/// ```
/// use datashape_collection::{EmailCollection, Key};
/// use datashape_core::Email;
///
/// let mut emails = EmailCollection::new();
/// emails.add(Email::parse("Ops@Example.com").unwrap()).unwrap();
/// emails.add(Email::parse("ops@example.com").unwrap()).unwrap();
///
/// assert_eq!(emails.count(), 1);
/// assert!(emails.has("OPS@example.com"));
/// assert!(emails.offset_exists(&Key::from("ops@example.com")));
/// ```
pub struct TypedCollection<P: AdmissionPolicy> {
    entries: BTreeMap<u64, (Key, P::Item)>,
    slots: HashMap<Key, u64>,
    next_seq: u64,
    next_index: usize,
    _policy: PhantomData<fn() -> P>,
}

impl<P: AdmissionPolicy> TypedCollection<P> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            slots: HashMap::new(),
            next_seq: 0,
            next_index: 0,
            _policy: PhantomData,
        }
    }

    /// Create a collection from initial elements, admitting each in order.
    pub fn from_items(items: impl IntoIterator<Item = P::Item>) -> Result<Self> {
        let mut collection = Self::new();
        for item in items {
            collection.add(item)?;
        }
        Ok(collection)
    }

    /// Admit `item` and store it under its natural key, or at the next
    /// positional index.
    pub fn add(&mut self, item: P::Item) -> Result<()> {
        if let Err(err) = P::check(&item) {
            debug!(target: "datashape::collection", "element rejected";
                collection = P::NAME, reason = err);
            return Err(err);
        }
        if self.next_index == usize::MAX && P::natural_key(&item).is_none() {
            return Err(P::invalid("no positional index is left"));
        }
        self.push_admitted(item);
        Ok(())
    }

    /// Store an element that already satisfies the policy.
    pub(crate) fn push_admitted(&mut self, item: P::Item) {
        let key = match P::natural_key(&item) {
            Some(name) => Key::Name(name),
            None => Key::Index(self.next_index),
        };
        self.store(key, item);
    }

    fn store(&mut self, key: Key, item: P::Item) {
        if let Key::Index(index) = key {
            self.next_index = self.next_index.max(index.saturating_add(1));
        }

        match self.slots.get(&key).copied() {
            Some(seq) => {
                trace!(target: "datashape::collection", "slot replaced";
                    collection = P::NAME, key = key);
                if let Some(entry) = self.entries.get_mut(&seq) {
                    entry.1 = item;
                }
            }
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.slots.insert(key.clone(), seq);
                self.entries.insert(seq, (key, item));
            }
        }
    }

    /// Element stored at `key`.
    pub fn offset_get(&self, key: &Key) -> Option<&P::Item> {
        self.slots
            .get(key)
            .and_then(|seq| self.entries.get(seq))
            .map(|(_, item)| item)
    }

    pub fn offset_exists(&self, key: &Key) -> bool {
        self.slots.contains_key(key)
    }

    /// Store `item` at `key`, or behave like [`add`](Self::add) when `key`
    /// is `None`.
    ///
    /// Keyed variants only accept the element's own natural key.
    pub fn offset_set(&mut self, key: Option<Key>, item: P::Item) -> Result<()> {
        let Some(key) = key else {
            return self.add(item);
        };

        P::check(&item)?;

        if key.as_index() == Some(usize::MAX) {
            return Err(P::invalid(format!("index {} is out of range", key)));
        }

        if let Some(natural) = P::natural_key(&item)
            && key.as_name() != Some(natural.as_str())
        {
            debug!(target: "datashape::collection", "key mismatch";
                collection = P::NAME, key = key, expected = natural);
            return Err(P::invalid(format!(
                "key \"{}\" does not match \"{}\"",
                key, natural
            )));
        }

        self.store(key, item);
        Ok(())
    }

    /// Remove and return the element at `key`.
    pub fn offset_unset(&mut self, key: &Key) -> Option<P::Item> {
        let seq = self.slots.remove(key)?;
        self.entries.remove(&seq).map(|(_, item)| item)
    }

    pub fn first(&self) -> Option<&P::Item> {
        self.entries.values().next().map(|(_, item)| item)
    }

    pub fn last(&self) -> Option<&P::Item> {
        self.entries.values().next_back().map(|(_, item)| item)
    }

    /// Remove every element and reset positional numbering.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.slots.clear();
        self.next_seq = 0;
        self.next_index = 0;
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of `(key, element)` pairs in order.
    pub fn as_array(&self) -> Vec<(Key, P::Item)>
    where
        P::Item: Clone,
    {
        self.entries.values().cloned().collect()
    }

    /// Elements in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &P::Item> + '_ {
        self.entries.values().map(|(_, item)| item)
    }

    /// Keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> + '_ {
        self.entries.values().map(|(key, _)| key)
    }

    /// `(key, element)` pairs in order.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = (&Key, &P::Item)> + '_ {
        self.entries.values().map(|(key, item)| (key, item))
    }

    /// Cursor positioned at the first element.
    pub fn cursor(&self) -> Cursor<'_, P> {
        Cursor::new(self)
    }

    pub(crate) fn seq_after(&self, seq: Option<u64>) -> Option<u64> {
        match seq {
            None => self.entries.keys().next().copied(),
            Some(seq) => self
                .entries
                .range(seq + 1..)
                .next()
                .map(|(next, _)| *next),
        }
    }

    pub(crate) fn entry_at(&self, seq: u64) -> Option<(&Key, &P::Item)> {
        self.entries.get(&seq).map(|(key, item)| (key, item))
    }

    /// Replace the element order; keys follow their elements.
    pub(crate) fn reorder(&mut self, ordered: Vec<(Key, P::Item)>) {
        self.entries.clear();
        self.slots.clear();
        self.next_seq = 0;
        for (key, item) in ordered {
            self.store(key, item);
        }
    }

    pub(crate) fn take_entries(&mut self) -> Vec<(Key, P::Item)> {
        self.slots.clear();
        std::mem::take(&mut self.entries).into_values().collect()
    }
}

impl<P: KeyedPolicy> TypedCollection<P> {
    /// Natural keys in order.
    pub fn to_array(&self) -> Vec<String> {
        self.keys()
            .filter_map(Key::as_name)
            .map(str::to_string)
            .collect()
    }

    /// Whether an element with natural key `key` is present.
    pub fn has_key(&self, key: &str) -> bool {
        self.offset_exists(&Key::Name(key.to_string()))
    }

    fn get_by_key(&self, key: &str) -> Option<&P::Item> {
        self.offset_get(&Key::Name(key.to_string()))
    }
}

impl<P: RawAdmission> TypedCollection<P> {
    /// Admit loosely typed input, e.g. a decoded JSON value.
    pub fn add_raw(&mut self, raw: &Value) -> Result<()> {
        match P::from_raw(raw) {
            Some(item) => self.add(item),
            None => {
                debug!(target: "datashape::collection", "raw element rejected";
                    collection = P::NAME, raw = raw);
                Err(P::invalid(format!("{} has the wrong shape", raw)))
            }
        }
    }
}

impl EmailCollection {
    /// Address equal to `email`, ignoring case and surrounding whitespace.
    pub fn get(&self, email: impl AsRef<str>) -> Option<&datashape_core::Email> {
        self.get_by_key(&email.as_ref().trim().to_lowercase())
    }

    pub fn has(&self, email: impl AsRef<str>) -> bool {
        self.get(email).is_some()
    }
}

impl NumericIdCollection {
    pub fn has(&self, id: i64) -> bool {
        self.has_key(&ByPositiveId::key_of(&id))
    }

    /// Ids in order.
    pub fn ids(&self) -> Vec<i64> {
        self.iter().copied().collect()
    }
}

impl UuidCollection {
    pub fn has(&self, id: &Uuid) -> bool {
        self.has_key(&ByUuid::key_of(id))
    }
}

impl<P: AdmissionPolicy> Default for TypedCollection<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: AdmissionPolicy> Clone for TypedCollection<P>
where
    P::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            slots: self.slots.clone(),
            next_seq: self.next_seq,
            next_index: self.next_index,
            _policy: PhantomData,
        }
    }
}

impl<P: AdmissionPolicy> fmt::Debug for TypedCollection<P>
where
    P::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<P: AdmissionPolicy> PartialEq for TypedCollection<P>
where
    P::Item: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries().eq(other.entries())
    }
}

impl<P: AdmissionPolicy> Serialize for TypedCollection<P>
where
    P::Item: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'a, P: AdmissionPolicy> IntoIterator for &'a TypedCollection<P> {
    type Item = &'a P::Item;
    type IntoIter = Box<dyn DoubleEndedIterator<Item = &'a P::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<P: AdmissionPolicy> IntoIterator for TypedCollection<P> {
    type Item = P::Item;
    type IntoIter = std::iter::Map<
        std::collections::btree_map::IntoValues<u64, (Key, P::Item)>,
        fn((Key, P::Item)) -> P::Item,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .into_values()
            .map(item_of::<P::Item> as fn((Key, P::Item)) -> P::Item)
    }
}

fn item_of<T>((_, item): (Key, T)) -> T {
    item
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for item in iter {
            collection.push_admitted(item);
        }
        collection
    }
}

impl<T> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_admitted(item);
        }
    }
}

impl<P: AdmissionPolicy> FieldPresence for TypedCollection<P> {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}
