//! Integration tests for common datashape workflows.
//!
//! These tests go through the facade crate the way applications do.

use datashape::prelude::*;
use datashape::datashape_validation::{filter_boolean, filter_date, filter_positive_integer};
use serde_json::{Value, json};

// =============================================================================
// Request filtering and validation
// =============================================================================

#[derive(Debug, Request)]
#[request(source = "invite")]
struct InviteRequest {
    #[required(key = "Recipients")]
    recipients: EmailCollection,
    #[required(code = "team_missing")]
    team_id: Option<i64>,
    message: Option<String>,
    notify: bool,
}

impl InviteRequest {
    fn from_raw(raw: &Value, filters: &FilterSet) -> Self {
        let mut recipients = EmailCollection::new();
        for item in raw["recipients"].as_array().into_iter().flatten() {
            // Invalid addresses are dropped rather than reported.
            let _ = recipients.add_raw(item);
        }

        Self {
            recipients,
            team_id: filters.positive_integer(&raw["team_id"]),
            message: filters.text(&raw["message"]),
            notify: filters.boolean(&raw["notify"]),
        }
    }
}

#[test]
fn test_valid_request_passes() {
    let filters = FilterSet::default();
    let raw = json!({
        "recipients": ["Ann@Example.com", "bogus", "ann@example.com", "bob@example.org"],
        "team_id": "12",
        "message": "<b>Welcome</b>\naboard",
        "notify": "on",
    });

    let request = InviteRequest::from_raw(&raw, &filters);

    assert_eq!(request.recipients.to_array(), vec!["ann@example.com", "bob@example.org"]);
    assert_eq!(request.team_id, Some(12));
    assert!(request.notify);
    assert!(request.validate().is_success());
}

#[test]
fn test_missing_fields_are_collected_in_order() {
    let filters = FilterSet::default();
    let request = InviteRequest::from_raw(&json!({"team_id": "-3", "recipients": ["x"]}), &filters);

    let result = request.validate();
    let properties: Vec<_> = result.errors().iter().filter_map(ValidationError::property).collect();

    assert_eq!(properties, vec!["recipients", "team_id"]);
    assert_eq!(result.codes(), vec!["required", "team_missing"]);
    assert!(result.clone().into_result().is_err());
}

#[test]
fn test_validation_result_serializes() {
    let request = InviteRequest {
        recipients: EmailCollection::new(),
        team_id: Some(1),
        message: None,
        notify: false,
    };

    let json = request.validate().to_json();
    assert_eq!(json["errors"][0]["code"], "required");
    assert_eq!(json["errors"][0]["context"]["property"], "recipients");
}

// =============================================================================
// Localized messages from configured catalogs
// =============================================================================

#[cfg(all(feature = "config", feature = "i18n"))]
#[test]
fn test_settings_drive_localized_messages() {
    use datashape::datashape_config::ConfigManager;
    use std::fs;

    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("de")).unwrap();
    fs::write(
        root.path().join("de").join("invite.json"),
        r#"{"request": {"field_with_key_required": "{key} ist erforderlich"}}"#,
    )
    .unwrap();

    let config = ConfigManager::new();
    config.set("locale", "de").unwrap();
    config
        .set("messages_dir", root.path().to_string_lossy().to_string())
        .unwrap();

    let settings = config.settings().unwrap();
    let i18n = settings.build_i18n().unwrap();
    let request = InviteRequest {
        recipients: EmailCollection::new(),
        team_id: Some(4),
        message: None,
        notify: false,
    };

    let result = request.validate_with(&i18n);
    assert_eq!(result.messages(), vec!["Recipients ist erforderlich"]);
}

// =============================================================================
// Filters
// =============================================================================

#[test]
fn test_filter_properties() {
    assert_eq!(filter_positive_integer(&json!("-1")), None);
    assert_eq!(filter_positive_integer(&json!("0")), None);
    assert!(filter_boolean(&json!("Y")));
    assert!(!filter_boolean(&json!("off")));
    assert_eq!(filter_date(&json!("2024-02-30"), "Y-m-d"), None);
}

// =============================================================================
// Collections with accessors
// =============================================================================

#[derive(Debug, Clone, Accessors)]
struct Ticket {
    title: String,
    open: bool,
    priority: i64,
}

fn ticket(title: &str, open: bool, priority: i64) -> Ticket {
    Ticket {
        title: title.to_string(),
        open,
        priority,
    }
}

#[test]
fn test_query_and_sort_tickets() {
    let tickets: Collection<Ticket> = [
        ticket("login broken", true, 1),
        ticket("typo", false, 3),
        ticket("slow search", true, 2),
        ticket("crash on save", true, 1),
    ]
    .into_iter()
    .collect();

    let mut open = tickets.with("open", true).unwrap();
    open.sort_by_order(&OrderSpec::from_json(&json!({"priority": "asc", "title": "desc"})))
        .unwrap();

    let titles: Vec<_> = open.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["login broken", "crash on save", "slow search"]);

    assert!(matches!(
        tickets.with("assignee", "ann"),
        Err(CollectionError::MethodNotFound { .. })
    ));
    assert_eq!(
        tickets.find(|t| t.priority == 3).map(|t| t.title.as_str()),
        Some("typo")
    );
}
