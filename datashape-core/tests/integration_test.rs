//! Integration tests for datashape-core accessors

use chrono::NaiveDate;
use datashape_core::accessor::{AccessorKind, resolve_accessor};
use datashape_core::prelude::*;
use datashape_core::bag_accessors;
use datashape_macro::Accessors;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, Accessors)]
struct Customer {
    first_name: String,
    email: Email,
    verified: bool,
    #[accessors(is)]
    tags: Vec<String>,
    born: Option<NaiveDate>,
    external_id: Uuid,
    #[accessors(skip)]
    #[allow(dead_code)]
    secret: String,
}

fn customer() -> Customer {
    Customer {
        first_name: "Ada".to_string(),
        email: Email::parse("ada@example.com").unwrap(),
        verified: true,
        tags: vec![],
        born: NaiveDate::from_ymd_opt(1815, 12, 10),
        external_id: Uuid::nil(),
        secret: "hunter2".to_string(),
    }
}

#[test]
fn test_derived_getters() {
    let c = customer();

    assert_eq!(c.call("get_first_name"), Some(FieldValue::from("Ada")));
    assert_eq!(c.call("get_email"), Some(FieldValue::from("ada@example.com")));
    assert_eq!(
        c.call("get_born"),
        Some(FieldValue::Date(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap()))
    );
    assert_eq!(
        c.call("get_external_id"),
        Some(FieldValue::from("00000000-0000-0000-0000-000000000000"))
    );
}

#[test]
fn test_derived_predicates() {
    let c = customer();

    assert_eq!(c.call("is_verified"), Some(FieldValue::Bool(true)));
    assert_eq!(c.call("is_tags"), Some(FieldValue::Bool(false)));
    assert_eq!(c.call("is_first_name"), None);
    assert!(!Customer::responds_to("is_born"));
}

#[test]
fn test_skipped_fields_have_no_accessor() {
    assert!(!Customer::responds_to("get_secret"));
    assert_eq!(customer().call("get_secret"), None);
}

#[test]
fn test_resolution_against_derived_type() {
    assert_eq!(
        resolve_accessor::<Customer>("verified", true).as_deref(),
        Some("is_verified")
    );
    assert_eq!(
        resolve_accessor::<Customer>("firstName", true).as_deref(),
        Some("get_first_name")
    );
    assert_eq!(resolve_accessor::<Customer>("secret", false), None);
    assert_eq!(AccessorKind::Is.method_for("Verified"), "is_verified");
}

struct Settings(FieldBag);

impl HasFieldBag for Settings {
    fn field_bag(&self) -> &FieldBag {
        &self.0
    }
}

bag_accessors!(Settings { theme, beta_features, retries });

#[test]
fn test_bag_accessors_from_json() {
    let settings = Settings(
        FieldBag::from_json(json!({"theme": "dark", "betaFeatures": "0", "retries": 3})).unwrap(),
    );

    assert_eq!(settings.call("get_theme"), Some(FieldValue::from("dark")));
    assert_eq!(settings.call("isBetaFeatures"), Some(FieldValue::Bool(false)));
    assert_eq!(settings.call("get_retries"), Some(FieldValue::Int(3)));
    assert_eq!(settings.call("get_color"), None);
    assert!(Settings::responds_to("is_theme"));
}

#[test]
fn test_bag_rejects_non_object_json() {
    assert!(matches!(
        FieldBag::from_json(json!([1, 2])),
        Err(CoreError::NotAnObject(_))
    ));
}

#[test]
fn test_typed_fields_on_bag() {
    const RETRIES: Field<i64> = Field::new("retries");
    const OWNER: Field<Email> = Field::new("owner");

    let mut bag = FieldBag::new();
    bag.put(&RETRIES, 5);
    bag.put(&OWNER, Email::parse("ops@example.com").unwrap());

    assert_eq!(bag.get(&RETRIES), Some(5));
    assert_eq!(bag.get(&OWNER).map(|e| e.domain().to_string()), Some("example.com".into()));
    assert!(bag.is("owner"));
}
