//! Admission policies.
//!
//! A policy fixes the element type of a [`TypedCollection`], checks each
//! element on the way in and decides where it is stored: at the next
//! positional index, or under a natural key derived from the element.
//!
//! [`TypedCollection`]: crate::TypedCollection

use crate::{CollectionError, Result};
use datashape_core::Email;
use datashape_validation::{as_text, filter_positive_integer, filter_uuid_as_uuid};
use serde_json::Value;
use std::marker::PhantomData;
use uuid::Uuid;

/// Element admission rules for a collection variant.
pub trait AdmissionPolicy {
    type Item;

    /// Variant name used in errors and logs.
    const NAME: &'static str;

    /// What the variant accepts, e.g. `"positive integers"`.
    const ACCEPTS: &'static str;

    /// Reject elements that break the variant's invariant.
    fn check(_item: &Self::Item) -> Result<()> {
        Ok(())
    }

    /// Natural key of an element; `None` for positional storage.
    fn natural_key(_item: &Self::Item) -> Option<String> {
        None
    }

    fn invalid(reason: impl Into<String>) -> CollectionError {
        CollectionError::InvalidInput {
            collection: Self::NAME,
            expected: Self::ACCEPTS,
            reason: reason.into(),
        }
    }
}

/// Policies that store every element under a natural key.
pub trait KeyedPolicy: AdmissionPolicy {
    fn key_of(item: &Self::Item) -> String;
}

/// Policies that can admit loosely typed input.
pub trait RawAdmission: AdmissionPolicy {
    /// Typed element for raw input, or `None` when it has the wrong shape.
    fn from_raw(raw: &Value) -> Option<Self::Item>;
}

/// Any value, appended at the next index.
pub struct Positional<T>(PhantomData<fn() -> T>);

impl<T> AdmissionPolicy for Positional<T> {
    type Item = T;
    const NAME: &'static str = "Collection";
    const ACCEPTS: &'static str = "any value";
}

/// Email addresses keyed by their lowercase form.
pub struct ByEmail;

impl AdmissionPolicy for ByEmail {
    type Item = Email;
    const NAME: &'static str = "EmailCollection";
    const ACCEPTS: &'static str = "email addresses";

    fn natural_key(item: &Email) -> Option<String> {
        Some(Self::key_of(item))
    }
}

impl KeyedPolicy for ByEmail {
    fn key_of(item: &Email) -> String {
        item.normalized()
    }
}

impl RawAdmission for ByEmail {
    fn from_raw(raw: &Value) -> Option<Email> {
        Email::try_from_raw(&as_text(raw))
    }
}

/// Integer ids of at least 1, keyed by their decimal form.
pub struct ByPositiveId;

impl AdmissionPolicy for ByPositiveId {
    type Item = i64;
    const NAME: &'static str = "NumericIdCollection";
    const ACCEPTS: &'static str = "positive integers";

    fn check(item: &i64) -> Result<()> {
        if *item >= 1 {
            Ok(())
        } else {
            Err(Self::invalid(format!("{} is not positive", item)))
        }
    }

    fn natural_key(item: &i64) -> Option<String> {
        Some(Self::key_of(item))
    }
}

impl KeyedPolicy for ByPositiveId {
    fn key_of(item: &i64) -> String {
        item.to_string()
    }
}

impl RawAdmission for ByPositiveId {
    fn from_raw(raw: &Value) -> Option<i64> {
        filter_positive_integer(raw)
    }
}

/// UUIDs keyed by their hyphenated lowercase form.
pub struct ByUuid;

impl AdmissionPolicy for ByUuid {
    type Item = Uuid;
    const NAME: &'static str = "UuidCollection";
    const ACCEPTS: &'static str = "UUIDs";

    fn natural_key(item: &Uuid) -> Option<String> {
        Some(Self::key_of(item))
    }
}

impl KeyedPolicy for ByUuid {
    fn key_of(item: &Uuid) -> String {
        item.hyphenated().to_string()
    }
}

impl RawAdmission for ByUuid {
    fn from_raw(raw: &Value) -> Option<Uuid> {
        filter_uuid_as_uuid(raw)
    }
}
