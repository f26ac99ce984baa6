//! Explicit iteration cursor.

use crate::policy::AdmissionPolicy;
use crate::{Key, TypedCollection};

/// Cursor over a [`TypedCollection`] with `rewind`/`valid`/`next`/
/// `current`/`key` stepping.
///
/// The cursor borrows the collection, so it cannot be mutated while a
/// cursor is alive.
///
/// ```
/// use datashape_collection::{Collection, Key};
///
/// let names: Collection<&str> = ["a", "b"].into_iter().collect();
/// let mut cursor = names.cursor();
///
/// let mut seen = Vec::new();
/// while cursor.valid() {
///     seen.push((cursor.key().cloned(), cursor.current().copied()));
///     cursor.next();
/// }
///
/// assert_eq!(seen, vec![(Some(Key::Index(0)), Some("a")), (Some(Key::Index(1)), Some("b"))]);
/// ```
pub struct Cursor<'a, P: AdmissionPolicy> {
    collection: &'a TypedCollection<P>,
    position: Option<u64>,
}

impl<'a, P: AdmissionPolicy> Cursor<'a, P> {
    pub(crate) fn new(collection: &'a TypedCollection<P>) -> Self {
        Self {
            collection,
            position: collection.seq_after(None),
        }
    }

    /// Move back to the first element.
    pub fn rewind(&mut self) {
        self.position = self.collection.seq_after(None);
    }

    /// Whether the cursor points at an element.
    pub fn valid(&self) -> bool {
        self.position.is_some()
    }

    /// Advance to the next element. A no-op past the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if let Some(seq) = self.position {
            self.position = self.collection.seq_after(Some(seq));
        }
    }

    pub fn current(&self) -> Option<&'a P::Item> {
        self.entry().map(|(_, item)| item)
    }

    pub fn key(&self) -> Option<&'a Key> {
        self.entry().map(|(key, _)| key)
    }

    fn entry(&self) -> Option<(&'a Key, &'a P::Item)> {
        self.position.and_then(|seq| self.collection.entry_at(seq))
    }
}
