//! Typed, ordered collections for datashape.
//!
//! A [`TypedCollection`] stores elements in insertion order behind an
//! admission policy. The policy fixes the element type, rejects values that
//! break the variant's invariant and decides the storage key:
//!
//! | alias                   | element   | key                       |
//! |-------------------------|-----------|---------------------------|
//! | [`Collection<T>`]       | any `T`   | next positional index     |
//! | [`EmailCollection`]     | `Email`   | lowercase address         |
//! | [`NumericIdCollection`] | `i64 >= 1`| decimal id                |
//! | [`UuidCollection`]      | `Uuid`    | hyphenated lowercase UUID |
//!
//! Keyed variants deduplicate by key. Collections of elements that
//! implement [`Accessors`](datashape_core::Accessors) also support
//! [`with`](TypedCollection::with) and
//! [`sort_by_order`](TypedCollection::sort_by_order).
//!
//! # Examples
//!
//! ```
//! use datashape_collection::NumericIdCollection;
//! use serde_json::json;
//!
//! let mut ids = NumericIdCollection::new();
//! ids.add(3).unwrap();
//! ids.add_raw(&json!("8")).unwrap();
//! ids.add(3).unwrap();
//!
//! assert!(ids.add(0).is_err());
//! assert_eq!(ids.ids(), vec![3, 8]);
//! assert_eq!(ids.to_array(), vec!["3", "8"]);
//! ```

mod collection;
mod cursor;
mod error;
mod key;
mod order;
pub mod policy;
mod query;

pub use collection::{
    Collection, EmailCollection, NumericIdCollection, TypedCollection, UuidCollection,
};
pub use cursor::Cursor;
pub use error::{CollectionError, Result};
pub use key::Key;
pub use order::{Direction, OrderSpec};
pub use policy::AdmissionPolicy;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        AdmissionPolicy, Collection, CollectionError, Cursor, Direction, EmailCollection, Key,
        NumericIdCollection, OrderSpec, TypedCollection, UuidCollection,
    };
}
