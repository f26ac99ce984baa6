//! Integration tests for datashape-collection

use datashape_collection::*;
use datashape_core::{Accessors, Email, FieldBag, FieldValue, HasFieldBag, bag_accessors};
use datashape_macro::{Accessors, Request};
use datashape_validation::{FieldPresence, Request};
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, Accessors)]
struct Member {
    name: String,
    email: Email,
    active: bool,
    age: Option<i64>,
    #[accessors(skip)]
    password_hash: String,
}

fn member(name: &str, active: bool, age: Option<i64>) -> Member {
    Member {
        name: name.to_string(),
        email: Email::parse(&format!("{}@example.com", name)).unwrap(),
        active,
        age,
        password_hash: String::new(),
    }
}

fn members() -> Collection<Member> {
    Collection::from_items([
        member("ann", true, Some(41)),
        member("bob", false, Some(29)),
        member("cid", true, None),
        member("dan", true, Some(29)),
    ])
    .unwrap()
}

fn names(collection: &Collection<Member>) -> Vec<&str> {
    collection.iter().map(|m| m.name.as_str()).collect()
}

#[test]
fn test_with_active_keeps_relative_order() {
    let all = members();
    let active = all.with("active", true).unwrap();

    assert_eq!(names(&active), vec!["ann", "cid", "dan"]);
    assert!(active.iter().all(|m| m.call("is_active") == Some(FieldValue::Bool(true))));
    assert_eq!(names(&all.with("active", false).unwrap()), vec!["bob"]);
}

#[test]
fn test_with_compares_typed_values() {
    let all = members();

    assert_eq!(names(&all.with("age", 29).unwrap()), vec!["bob", "dan"]);
    assert_eq!(names(&all.with("age", None::<i64>).unwrap()), vec!["cid"]);
    assert_eq!(names(&all.with("name", "ann").unwrap()), vec!["ann"]);
}

#[test]
fn test_with_skipped_field_is_unknown() {
    let err = members().with("password_hash", "").unwrap_err();
    assert!(matches!(err, CollectionError::MethodNotFound { ref method, .. } if method == "get_password_hash"));
}

#[test]
fn test_with_on_empty_collection_still_checks_accessor() {
    let empty: Collection<Member> = Collection::new();

    assert!(empty.with("active", true).unwrap().is_empty());
    assert!(empty.with("nickname", "x").is_err());
}

#[test]
fn test_sort_members_by_json_spec() {
    let mut all = members();
    all.sort_by_order(&OrderSpec::from_json(&json!([{"age": "desc"}, "name"])))
        .unwrap();

    assert_eq!(names(&all), vec!["ann", "bob", "dan", "cid"]);
}

#[test]
fn test_cursor_walks_keys_and_values() {
    let all = members();
    let mut cursor = all.cursor();
    let mut keys = Vec::new();

    while cursor.valid() {
        keys.push(cursor.key().cloned());
        cursor.next();
    }

    assert_eq!(
        keys,
        (0..4).map(|i| Some(Key::Index(i))).collect::<Vec<_>>()
    );
}

#[test]
fn test_email_collection_properties() {
    let mut emails = EmailCollection::new();
    let ann = Email::parse("Ann@Example.com").unwrap();

    emails.add(ann.clone()).unwrap();
    assert!(emails.has(&ann));
    assert!(emails.has("ann@example.com"));

    emails.add(Email::parse("ann@example.com").unwrap()).unwrap();
    assert_eq!(emails.count(), 1);

    emails.add_raw(&json!("not-an-email")).unwrap_err();
    emails.add_raw(&json!(" zed@example.org ")).unwrap();
    assert_eq!(emails.to_array(), vec!["ann@example.com", "zed@example.org"]);

    emails.offset_unset(&Key::from("ann@example.com"));
    assert!(!emails.has(&ann));

    emails.clear();
    assert!(emails.is_empty());
}

#[test]
fn test_uuid_and_numeric_variants() {
    let first = Uuid::new_v4();
    let mut uuids = UuidCollection::from_items([first, Uuid::new_v4()]).unwrap();
    uuids.add(first).unwrap();

    assert_eq!(uuids.count(), 2);
    assert!(uuids.has(&first));
    assert_eq!(uuids.first(), Some(&first));

    let mut ids = NumericIdCollection::new();
    for raw in [json!(5), json!("6"), json!("-1"), json!("x"), json!(5)] {
        let _ = ids.add_raw(&raw);
    }
    assert_eq!(ids.ids(), vec![5, 6]);
}

#[test]
fn test_filter_returns_same_variant() {
    let ids = NumericIdCollection::from_items([1, 2, 3, 4]).unwrap();
    let even: NumericIdCollection = ids.filter(|id| id % 2 == 0);

    assert_eq!(even.ids(), vec![2, 4]);
    assert!(even.has(4));
    assert!(NumericIdCollection::new().filter(|_| true).is_empty());
}

#[derive(Clone)]
struct Order(FieldBag);

impl HasFieldBag for Order {
    fn field_bag(&self) -> &FieldBag {
        &self.0
    }
}

bag_accessors!(Order { status, paid, total });

#[test]
fn test_bag_backed_elements() {
    let orders: Collection<Order> = [
        Order(FieldBag::new().with("status", "new").with("paid", false).with("total", 10)),
        Order(FieldBag::new().with("status", "done").with("paid", true).with("total", 25)),
        Order(FieldBag::new().with("status", "done").with("paid", 1).with("total", 5)),
    ]
    .into_iter()
    .collect();

    assert_eq!(orders.with("status", "done").unwrap().len(), 2);
    assert_eq!(orders.with("paid", true).unwrap().len(), 2);

    let mut sorted = orders.clone();
    sorted.sort_by_order(&OrderSpec::new().asc("total")).unwrap();
    let totals: Vec<_> = sorted.iter().map(|o| o.call("get_total")).collect();
    assert_eq!(
        totals,
        vec![Some(5.into()), Some(10.into()), Some(25.into())]
    );
}

#[derive(Request)]
struct Invite {
    #[required(key = "Recipients")]
    recipients: EmailCollection,
    #[required]
    team_ids: NumericIdCollection,
}

#[test]
fn test_collections_as_required_fields() {
    let invite = Invite {
        recipients: EmailCollection::new(),
        team_ids: NumericIdCollection::from_items([7]).unwrap(),
    };

    assert!(invite.recipients.is_missing());

    let result = invite.validate();
    assert_eq!(result.len(), 1);
    assert_eq!(result.errors()[0].property(), Some("recipients"));
    assert_eq!(result.errors()[0].code, "required");
}
