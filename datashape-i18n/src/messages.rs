//! Message catalogs
//!
//! Messages are grouped per locale. A catalog directory holds one
//! sub-directory per locale tag with one JSON file per *source*:
//!
//! ```text
//! lang/
//!   en/profile_request.json
//!   ru/profile_request.json
//! ```
//!
//! Sources are loaded lazily by name and only once; a failed load can be
//! retried.

use crate::{I18nError, Locale, Result};
use datashape_log::{debug, trace, warn};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Messages of a single locale keyed by message ID.
#[derive(Debug, Clone, Default)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl MessageBundle {
    /// Create a new empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON. Nested objects are flattened into dotted keys.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut bundle = Self::new();
        bundle.insert_flattened("", data);
        Ok(bundle)
    }

    fn insert_flattened(&mut self, prefix: &str, data: serde_json::Map<String, serde_json::Value>) {
        for (key, value) in data {
            let key = if prefix.is_empty() {
                key
            } else {
                format!("{}.{}", prefix, key)
            };
            match value {
                serde_json::Value::String(s) => {
                    self.messages.insert(key, s);
                }
                serde_json::Value::Object(nested) => self.insert_flattened(&key, nested),
                _ => trace!(target: "datashape::i18n", "skipping non-string message {}", key),
            }
        }
    }

    /// Add a message.
    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    /// Copy every message of `other` into this bundle, overwriting duplicates.
    pub fn merge(&mut self, other: MessageBundle) {
        self.messages.extend(other.messages);
    }

    /// Get a message.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Check if bundle has a message.
    pub fn has(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the bundle has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// All message keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.messages.keys()
    }
}

/// Message bundles for several locales.
#[derive(Debug, Default)]
pub struct Messages {
    bundles: HashMap<String, MessageBundle>,
}

impl Messages {
    /// Create a new messages collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a bundle into the locale's existing messages.
    pub fn add_bundle(&mut self, locale: &Locale, bundle: MessageBundle) {
        self.bundles.entry(locale.tag()).or_default().merge(bundle);
    }

    /// Bundle for a locale, falling back to the region-less locale.
    pub fn get_bundle(&self, locale: &Locale) -> Option<&MessageBundle> {
        locale
            .candidates()
            .iter()
            .find_map(|candidate| self.bundles.get(&candidate.tag()))
    }

    /// Look a key up for a locale, falling back to the region-less locale.
    pub fn lookup(&self, key: &str, locale: &Locale) -> Option<&str> {
        locale
            .candidates()
            .iter()
            .filter_map(|candidate| self.bundles.get(&candidate.tag()))
            .find_map(|bundle| bundle.get(key))
    }

    /// Load every `<locale>.json` file of a flat directory.
    pub fn load_from_dir(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();

        if !dir.is_dir() {
            return Err(I18nError::CatalogNotFound(dir.display().to_string()));
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| I18nError::ParseError(format!("Invalid filename: {:?}", path)))?;

                let locale = Locale::parse(stem)?;
                let bundle = MessageBundle::from_json(&fs::read_to_string(&path)?)?;
                self.add_bundle(&locale, bundle);
            }
        }

        Ok(())
    }
}

/// Translation front end.
///
/// Cheap to clone; clones share the loaded messages.
#[derive(Clone)]
pub struct I18n {
    messages: Arc<RwLock<Messages>>,
    loaded_sources: Arc<RwLock<HashSet<String>>>,
    catalog_root: Option<PathBuf>,
    default_locale: Locale,
    fallback_locale: Option<Locale>,
}

impl I18n {
    /// Create an instance with English defaults and no catalog directory.
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Messages::new())),
            loaded_sources: Arc::new(RwLock::new(HashSet::new())),
            catalog_root: None,
            default_locale: Locale::en(),
            fallback_locale: None,
        }
    }

    /// Set the default locale.
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Set the fallback locale.
    pub fn with_fallback(mut self, locale: Locale) -> Self {
        self.fallback_locale = Some(locale);
        self
    }

    /// Set the directory that per-source catalogs are read from.
    pub fn with_catalog_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.catalog_root = Some(dir.into());
        self
    }

    /// Load messages from a flat directory of `<locale>.json` files.
    pub fn load_from_dir(self, dir: impl AsRef<Path>) -> Result<Self> {
        self.messages.write().load_from_dir(dir)?;
        Ok(self)
    }

    /// Add a message bundle.
    pub fn add_bundle(&self, locale: &Locale, bundle: MessageBundle) {
        self.messages.write().add_bundle(locale, bundle);
    }

    /// Get the default locale.
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    fn lookup_locales<'a>(&'a self, locale: &'a Locale) -> Vec<&'a Locale> {
        let mut locales = vec![locale];
        if let Some(ref fallback) = self.fallback_locale {
            locales.push(fallback);
        }
        locales.push(&self.default_locale);
        locales
    }

    /// Load the catalog named `source` for the default and fallback locales.
    ///
    /// Loading is idempotent: a source is read from disk at most once. A
    /// failed load is forgotten, so the source can be loaded again.
    /// Missing files are not an error. Returns the number of messages read.
    pub fn load_source(&self, source: &str) -> Result<usize> {
        let Some(ref root) = self.catalog_root else {
            return Ok(0);
        };

        if !self.loaded_sources.write().insert(source.to_string()) {
            return Ok(0);
        }

        let bundles = match self.read_source(root, source) {
            Ok(bundles) => bundles,
            Err(err) => {
                self.loaded_sources.write().remove(source);
                warn!(target: "datashape::i18n", "catalog load failed"; source = source, error = err);
                return Err(err);
            }
        };

        let mut loaded = 0;
        for (locale, bundle) in bundles {
            loaded += bundle.len();
            self.add_bundle(&locale, bundle);
        }

        debug!(target: "datashape::i18n", "catalog loaded"; source = source, messages = loaded);
        Ok(loaded)
    }

    /// Parse every catalog file for `source`; nothing is registered unless
    /// all of them parse.
    fn read_source(&self, root: &Path, source: &str) -> Result<Vec<(Locale, MessageBundle)>> {
        let mut bundles = Vec::new();
        let mut seen = HashSet::new();
        for locale in self.lookup_locales(&self.default_locale) {
            for candidate in locale.candidates() {
                if !seen.insert(candidate.tag()) {
                    continue;
                }
                let path = root.join(candidate.tag()).join(format!("{}.json", source));
                if !path.is_file() {
                    continue;
                }
                let bundle = MessageBundle::from_json(&fs::read_to_string(&path)?)?;
                bundles.push((candidate, bundle));
            }
        }
        Ok(bundles)
    }

    /// Raw template for a key, trying the locale, the fallback locale and the
    /// default locale in turn.
    pub fn get(&self, key: &str, locale: &Locale) -> Option<String> {
        let messages = self.messages.read();
        let found = self
            .lookup_locales(locale)
            .into_iter()
            .find_map(|candidate| messages.lookup(key, candidate))
            .map(str::to_string);
        found
    }

    /// Translate a message key; an unknown key translates to itself.
    pub fn t(&self, key: &str, locale: &Locale) -> String {
        self.get(key, locale).unwrap_or_else(|| key.to_string())
    }

    /// Translate with arguments.
    ///
    /// Replaces `{name}` placeholders with provided values.
    pub fn t_args(&self, key: &str, locale: &Locale, args: &[(&str, &str)]) -> String {
        substitute(self.t(key, locale), args)
    }

    /// Formatted message or `None` when the key is unknown or its template
    /// is empty.
    pub fn format(&self, key: &str, locale: &Locale, args: &[(&str, &str)]) -> Option<String> {
        self.get(key, locale)
            .filter(|template| !template.is_empty())
            .map(|template| substitute(template, args))
    }

    /// Check if a message exists for the locale.
    pub fn has(&self, key: &str, locale: &Locale) -> bool {
        self.messages.read().lookup(key, locale).is_some()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("default_locale", &self.default_locale)
            .field("fallback_locale", &self.fallback_locale)
            .field("catalog_root", &self.catalog_root)
            .finish_non_exhaustive()
    }
}

fn substitute(mut template: String, args: &[(&str, &str)]) -> String {
    for (name, value) in args {
        template = template.replace(&format!("{{{}}}", name), value);
    }
    template
}
