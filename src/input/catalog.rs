//! Locale files as a static translation source.
//!
//! Files follow the Rails layout: the top-level keys are locales and each
//! locale holds a nested tree of translations.
//!
//! ```yaml
//! en:
//!   home:
//!     title: Welcome
//!     items:
//!       one: "%{count} item"
//!       other: "%{count} items"
//! ```

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use globset::{
    GlobBuilder,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use crate::backend::interpolate::interpolate;
use crate::backend::{
    MissingTranslation,
    StaticSource,
};
use crate::resolver::{
    KEY_SEPARATOR,
    PluralCategory,
    prepare_key,
};
use crate::types::{
    LookupOptions,
    TranslationValue,
};

/// Patterns recognized as locale files, matched case-insensitively.
const LOCALE_FILE_PATTERNS: [&str; 3] = ["**/*.yml", "**/*.yaml", "**/*.json"];

/// Errors raised while loading locale files.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document root is not a map of locales.
    #[error("{}: top level must map locales to translations", path.display())]
    NotALocaleMap { path: PathBuf },

    #[error("Failed to build locale file patterns: {0}")]
    Pattern(#[from] globset::Error),
}

/// Translation trees per locale, merged from locale files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    /// ロケールごとの翻訳ツリー
    locales: BTreeMap<String, Value>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every locale file under `dir`, recursively.
    ///
    /// Files are merged in path order; later files override leaf values of
    /// earlier ones. Symbolic links are not followed.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut files = collect_locale_files(dir)?;
        files.sort();

        let mut catalog = Self::new();
        for file in &files {
            catalog.load_file(file)?;
        }

        tracing::info!(
            files = files.len(),
            locales = catalog.locales.len(),
            "Loaded locale files from {}",
            dir.display()
        );
        Ok(catalog)
    }

    /// Merges one locale file into the catalog.
    pub fn load_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;

        let document: Value = if has_extension(path, "json") {
            serde_json::from_str(&content)
                .map_err(|source| CatalogError::Json { path: path.to_path_buf(), source })?
        } else {
            serde_yaml::from_str(&content)
                .map_err(|source| CatalogError::Yaml { path: path.to_path_buf(), source })?
        };

        match document {
            Value::Object(locales) => {
                for (locale, tree) in locales {
                    self.insert(&locale, tree);
                }
                tracing::debug!("Loaded locale file {}", path.display());
                Ok(())
            }
            // Empty file
            Value::Null => Ok(()),
            _ => Err(CatalogError::NotALocaleMap { path: path.to_path_buf() }),
        }
    }

    /// Deep-merges `tree` into the translations of `locale`.
    pub fn insert(&mut self, locale: &str, tree: Value) {
        match self.locales.get_mut(locale) {
            Some(existing) => deep_merge(existing, tree),
            None => {
                self.locales.insert(locale.to_string(), tree);
            }
        }
    }

    /// Locales with at least one loaded file.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Node at the dotted `key` in `locale`.
    fn find(&self, locale: &str, key: &str) -> Option<&Value> {
        if key.trim().is_empty() {
            return None;
        }

        let found = key
            .split(KEY_SEPARATOR)
            .try_fold(self.locales.get(locale)?, |node, segment| node.get(segment))?;

        (!found.is_null()).then_some(found)
    }
}

impl StaticSource for StaticCatalog {
    /// Resolves scope and plural suffix, then looks the key up.
    ///
    /// A plural category absent from the file falls back to `other`, and a
    /// plain string under the base key is used for any count.
    fn lookup(
        &self,
        locale: &str,
        key: &str,
        options: &LookupOptions,
    ) -> Result<TranslationValue, MissingTranslation> {
        let complete_key = prepare_key(locale, key, options);
        let pairs = options.interpolation_pairs();

        let mut candidates = vec![complete_key.clone()];
        if options.count.is_some()
            && let Some((base, _)) = complete_key.rsplit_once(KEY_SEPARATOR)
        {
            candidates.push(format!("{base}{KEY_SEPARATOR}{}", PluralCategory::Other));
            candidates.push(base.to_string());
        }

        let found = candidates
            .iter()
            .find_map(|candidate| self.find(locale, candidate))
            .and_then(to_translation_value);

        match found {
            Some(TranslationValue::Text(text)) => Ok(TranslationValue::Text(interpolate(&text, &pairs))),
            Some(map @ TranslationValue::Map(_)) => Ok(map),
            None => options.default.as_deref().map_or_else(
                || Err(MissingTranslation::new(locale, complete_key.as_str(), options.clone())),
                |default| Ok(TranslationValue::Text(interpolate(default, &pairs))),
            ),
        }
    }
}

/// Recursively collects locale files under `dir`.
fn collect_locale_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    // An unreadable root is an error; unreadable entries below it are skipped.
    std::fs::read_dir(dir).map_err(|source| CatalogError::Io { path: dir.to_path_buf(), source })?;
    let patterns = locale_file_patterns()?;

    let mut files = Vec::new();
    for result in WalkBuilder::new(dir)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let relative = entry.path().strip_prefix(dir).unwrap_or_else(|_| entry.path());
        if patterns.is_match(relative) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Glob set built from [`LOCALE_FILE_PATTERNS`].
fn locale_file_patterns() -> Result<GlobSet, CatalogError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in LOCALE_FILE_PATTERNS {
        builder.add(GlobBuilder::new(pattern).case_insensitive(true).build()?);
    }
    Ok(builder.build()?)
}

/// Case-insensitive extension check.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Merges `incoming` into `target`; maps merge per key, anything else replaces.
fn deep_merge(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (target, incoming) => *target = incoming,
    }
}

/// Converts a locale file node. `null` leaves are dropped.
fn to_translation_value(value: &Value) -> Option<TranslationValue> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(TranslationValue::Text(text.clone())),
        Value::Object(map) => Some(TranslationValue::Map(to_translation_map(map))),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) => {
            Some(TranslationValue::Text(value.to_string()))
        }
    }
}

/// Converts a locale file map, dropping `null` entries.
fn to_translation_map(map: &Map<String, Value>) -> BTreeMap<String, TranslationValue> {
    map.iter()
        .filter_map(|(key, value)| to_translation_value(value).map(|value| (key.clone(), value)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn catalog() -> StaticCatalog {
        let mut catalog = StaticCatalog::new();
        catalog.insert(
            "en",
            json!({
                "home": {
                    "title": "Welcome",
                    "greeting": "Hello %{name}",
                    "items": { "one": "%{count} item", "other": "%{count} items" },
                    "messages": "%{count} messages",
                    "empty": null
                },
                "version": 3
            }),
        );
        catalog
    }

    #[rstest]
    fn lookup_plain_key(catalog: StaticCatalog) {
        let value = catalog.lookup("en", "home.title", &LookupOptions::new());

        assert_eq!(value, Ok(TranslationValue::from("Welcome")));
    }

    #[rstest]
    fn lookup_with_scope_and_variables(catalog: StaticCatalog) {
        let options = LookupOptions::new().with_scope(["home"]).with_variable("name", "Ann");

        assert_eq!(catalog.lookup("en", "greeting", &options), Ok(TranslationValue::from("Hello Ann")));
    }

    #[rstest]
    #[case::one(1, "1 item")]
    #[case::other(5, "5 items")]
    #[case::zero(0, "0 items")]
    fn lookup_plural(catalog: StaticCatalog, #[case] count: i64, #[case] expected: &str) {
        let options = LookupOptions::new().with_count(count);

        assert_eq!(catalog.lookup("en", "home.items", &options), Ok(TranslationValue::from(expected)));
    }

    #[rstest]
    fn lookup_plain_string_with_count(catalog: StaticCatalog) {
        let options = LookupOptions::new().with_count(1);

        assert_eq!(
            catalog.lookup("en", "home.messages", &options),
            Ok(TranslationValue::from("1 messages"))
        );
    }

    #[rstest]
    fn lookup_subtree_returns_map(catalog: StaticCatalog) {
        let value = catalog.lookup("en", "home.items", &LookupOptions::new()).unwrap();

        assert_that!(value.is_map(), eq(true));
    }

    #[rstest]
    fn lookup_number_is_rendered_as_text(catalog: StaticCatalog) {
        assert_eq!(catalog.lookup("en", "version", &LookupOptions::new()), Ok(TranslationValue::from("3")));
    }

    #[rstest]
    #[case::unknown_key("en", "home.subtitle")]
    #[case::null_leaf("en", "home.empty")]
    #[case::unknown_locale("de", "home.title")]
    #[case::blank_key("en", "")]
    fn lookup_missing(catalog: StaticCatalog, #[case] locale: &str, #[case] key: &str) {
        let result = catalog.lookup(locale, key, &LookupOptions::new());

        assert_eq!(result, Err(MissingTranslation::new(locale, key, LookupOptions::new())));
    }

    #[rstest]
    fn lookup_missing_uses_default(catalog: StaticCatalog) {
        let options = LookupOptions::new().with_default("Hi %{name}").with_variable("name", "Bo");

        assert_eq!(catalog.lookup("en", "home.subtitle", &options), Ok(TranslationValue::from("Hi Bo")));
    }

    #[rstest]
    fn insert_deep_merges(mut catalog: StaticCatalog) {
        catalog.insert("en", json!({ "home": { "subtitle": "Start here", "title": "Hi" } }));

        assert_eq!(catalog.lookup("en", "home.subtitle", &LookupOptions::new()), Ok("Start here".into()));
        assert_eq!(catalog.lookup("en", "home.title", &LookupOptions::new()), Ok("Hi".into()));
        assert!(catalog.lookup("en", "home.greeting", &LookupOptions::new()).is_ok());
    }

    #[rstest]
    fn load_dir_merges_yaml_and_json() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("admin")).unwrap();
        fs::write(dir.path().join("en.yml"), "en:\n  home:\n    title: Welcome\n").unwrap();
        fs::write(dir.path().join("de.yaml"), "de:\n  home:\n    title: Willkommen\n").unwrap();
        fs::write(dir.path().join("admin/en.json"), r#"{"en": {"admin": {"title": "Admin"}}}"#).unwrap();
        fs::write(dir.path().join("README.md"), "not a locale file").unwrap();

        let catalog = StaticCatalog::load_dir(dir.path()).unwrap();

        assert_eq!(catalog.locales().collect::<Vec<_>>(), vec!["de", "en"]);
        assert_eq!(catalog.lookup("en", "admin.title", &LookupOptions::new()), Ok("Admin".into()));
        assert_eq!(catalog.lookup("en", "home.title", &LookupOptions::new()), Ok("Welcome".into()));
        assert_eq!(catalog.lookup("de", "home.title", &LookupOptions::new()), Ok("Willkommen".into()));
    }

    #[rstest]
    fn load_dir_matches_extensions_case_insensitively() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("EN.YML"), "en:\n  title: Welcome\n").unwrap();
        fs::write(dir.path().join("en.yml.bak"), "en:\n  title: Stale\n").unwrap();

        let catalog = StaticCatalog::load_dir(dir.path()).unwrap();

        assert_eq!(catalog.lookup("en", "title", &LookupOptions::new()), Ok("Welcome".into()));
    }

    #[cfg(unix)]
    #[rstest]
    fn load_dir_survives_symlink_cycles() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/en.yml"), "en:\n  title: Welcome\n").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("nested/loop")).unwrap();

        let files = collect_locale_files(dir.path()).unwrap();
        let catalog = StaticCatalog::load_dir(dir.path()).unwrap();

        assert_eq!(files, vec![dir.path().join("nested/en.yml")]);
        assert_eq!(catalog.lookup("en", "title", &LookupOptions::new()), Ok("Welcome".into()));
    }

    #[rstest]
    fn load_dir_reports_missing_directory() {
        let dir = TempDir::new().unwrap();

        let result = StaticCatalog::load_dir(&dir.path().join("absent"));

        assert_that!(result, err(displays_as(contains_substring("Failed to read"))));
    }

    #[rstest]
    fn load_file_rejects_non_map_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.yml");
        fs::write(&path, "- one\n- two\n").unwrap();

        let result = StaticCatalog::new().load_file(&path);

        assert_that!(result, err(displays_as(contains_substring("top level must map locales"))));
    }

    #[rstest]
    fn load_file_reports_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.yml");
        fs::write(&path, "en:\n  title: [unclosed\n").unwrap();

        let result = StaticCatalog::new().load_file(&path);

        assert_that!(result, err(displays_as(contains_substring("Failed to parse"))));
    }

    #[rstest]
    fn load_file_accepts_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.yml");
        fs::write(&path, "").unwrap();

        let mut catalog = StaticCatalog::new();

        assert!(catalog.load_file(&path).is_ok());
        assert_that!(catalog.locales().count(), eq(0));
    }
}
