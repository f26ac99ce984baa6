//! Integration tests for datashape-i18n catalog loading

use datashape_i18n::*;
use std::fs;

fn write_catalog(root: &std::path::Path, locale: &str, source: &str, body: &str) {
    let dir = root.join(locale);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{}.json", source)), body).unwrap();
}

#[test]
fn test_load_source_reads_default_and_fallback_locales() {
    let root = tempfile::tempdir().unwrap();
    write_catalog(
        root.path(),
        "ru",
        "profile",
        r#"{"request": {"field_required": "Поле обязательно"}}"#,
    );
    write_catalog(
        root.path(),
        "en",
        "profile",
        r#"{"request": {"field_required": "Field is required", "only_en": "English only"}}"#,
    );

    let i18n = I18n::new()
        .with_default_locale(Locale::ru())
        .with_fallback(Locale::en())
        .with_catalog_root(root.path());

    assert_eq!(i18n.load_source("profile").unwrap(), 3);

    assert_eq!(
        i18n.format("request.field_required", &Locale::ru(), &[]).as_deref(),
        Some("Поле обязательно")
    );
    assert_eq!(
        i18n.format("request.only_en", &Locale::ru(), &[]).as_deref(),
        Some("English only")
    );
}

#[test]
fn test_load_source_is_idempotent() {
    let root = tempfile::tempdir().unwrap();
    write_catalog(root.path(), "en", "order", r#"{"title": "Order"}"#);

    let i18n = I18n::new().with_catalog_root(root.path());

    assert_eq!(i18n.load_source("order").unwrap(), 1);
    assert_eq!(i18n.load_source("order").unwrap(), 0);
    assert!(i18n.has("title", &Locale::en()));
}

#[test]
fn test_missing_source_file_is_not_an_error() {
    let root = tempfile::tempdir().unwrap();
    let i18n = I18n::new().with_catalog_root(root.path());

    assert_eq!(i18n.load_source("nothing_here").unwrap(), 0);
}

#[test]
fn test_malformed_catalog_is_reported() {
    let root = tempfile::tempdir().unwrap();
    write_catalog(root.path(), "en", "broken", "{ not json");

    let i18n = I18n::new().with_catalog_root(root.path());
    let err = i18n.load_source("broken").unwrap_err();

    assert!(matches!(err, I18nError::JsonError(_)));
}

#[test]
fn test_failed_source_can_be_loaded_again() {
    let root = tempfile::tempdir().unwrap();
    write_catalog(root.path(), "en", "profile", r#"{"request": {"field_required": "#);

    let i18n = I18n::new().with_catalog_root(root.path());
    assert!(matches!(i18n.load_source("profile"), Err(I18nError::JsonError(_))));
    assert!(!i18n.has("request.field_required", &Locale::en()));

    write_catalog(
        root.path(),
        "en",
        "profile",
        r#"{"request": {"field_required": "Field is required"}}"#,
    );

    assert_eq!(i18n.load_source("profile").unwrap(), 1);
    assert_eq!(
        i18n.format("request.field_required", &Locale::en(), &[]).as_deref(),
        Some("Field is required")
    );
    assert_eq!(i18n.load_source("profile").unwrap(), 0);
}

#[test]
fn test_load_from_flat_dir() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("en.json"), r#"{"hello": "Hello"}"#).unwrap();
    fs::write(root.path().join("de.json"), r#"{"hello": "Hallo"}"#).unwrap();
    fs::write(root.path().join("notes.txt"), "ignored").unwrap();

    let i18n = I18n::new().load_from_dir(root.path()).unwrap();

    assert_eq!(i18n.t("hello", &Locale::de()), "Hallo");
    assert_eq!(i18n.t("hello", &Locale::en_us()), "Hello");
}

#[test]
fn test_load_from_missing_dir_fails() {
    let result = I18n::new().load_from_dir("/definitely/not/a/catalog/dir");
    assert!(matches!(result, Err(I18nError::CatalogNotFound(_))));
}
