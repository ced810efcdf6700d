//! Core types used throughout the project.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// Options accompanying a single translation lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupOptions {
    /// Scope segments prepended to the key (`["home", "hero"]` → `home.hero.<key>`).
    pub scope: Vec<String>,

    /// Pluralization count. Any present value, `0` included, selects a plural category.
    pub count: Option<i64>,

    /// Fallback value used when nothing is stored for the requested locale.
    pub default: Option<String>,

    /// Serve from the static source even when the store is the configured source.
    pub prefer_static: bool,

    /// Values substituted into `%{name}` placeholders.
    pub variables: BTreeMap<String, Value>,
}

impl LookupOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scope<I, S>(mut self, scope: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = scope.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub const fn preferring_static(mut self) -> Self {
        self.prefer_static = true;
        self
    }

    /// Placeholder name/value pairs available for interpolation.
    ///
    /// The count is exposed as `%{count}`; a caller variable with the same name wins.
    #[must_use]
    pub fn interpolation_pairs(&self) -> Vec<(&str, String)> {
        let mut pairs = Vec::with_capacity(self.variables.len() + 1);
        if let Some(count) = self.count
            && !self.variables.contains_key("count")
        {
            pairs.push(("count", count.to_string()));
        }
        pairs.extend(self.variables.iter().map(|(name, value)| (name.as_str(), display_value(value))));
        pairs
    }
}

/// String form of an interpolation value (strings are used verbatim, not JSON-quoted).
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A resolved translation: either a single string or a namespace of nested values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranslationValue {
    Text(String),
    Map(BTreeMap<String, TranslationValue>),
}

impl TranslationValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Map(_) => None,
        }
    }

    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Inserts `value` under the dotted `path`, creating intermediate maps.
    ///
    /// Does nothing when `self` is not a map or a text value already sits on the path.
    pub fn insert_path(&mut self, path: &[&str], value: Self) {
        let Self::Map(map) = self else {
            return;
        };
        match path {
            [] => {}
            [last] => {
                map.insert((*last).to_string(), value);
            }
            [first, rest @ ..] => {
                map.entry((*first).to_string())
                    .or_insert_with(|| Self::Map(BTreeMap::new()))
                    .insert_path(rest, value);
            }
        }
    }
}

impl From<&str> for TranslationValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TranslationValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn interpolation_pairs_expose_count_and_variables() {
        let options = LookupOptions::new().with_count(3).with_variable("name", "Ann");

        let pairs = options.interpolation_pairs();

        assert_eq!(pairs, vec![("count", "3".to_string()), ("name", "Ann".to_string())]);
    }

    #[rstest]
    fn interpolation_pairs_prefer_explicit_count_variable() {
        let options = LookupOptions::new().with_count(3).with_variable("count", "three");

        let pairs = options.interpolation_pairs();

        assert_eq!(pairs, vec![("count", "three".to_string())]);
    }

    #[rstest]
    #[case::string(json!("Ann"), "Ann")]
    #[case::number(json!(42), "42")]
    #[case::boolean(json!(true), "true")]
    #[case::null(json!(null), "")]
    fn display_value_renders_plain_strings(#[case] value: Value, #[case] expected: &str) {
        assert_that!(display_value(&value), eq(expected));
    }

    #[rstest]
    fn insert_path_builds_nested_maps() {
        let mut root = TranslationValue::Map(BTreeMap::new());

        root.insert_path(&["hero", "title"], "Welcome".into());
        root.insert_path(&["hero", "subtitle"], "Hello".into());
        root.insert_path(&["footer"], "Bye".into());

        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json, json!({"hero": {"title": "Welcome", "subtitle": "Hello"}, "footer": "Bye"}));
    }

    #[rstest]
    fn insert_path_does_not_descend_into_text() {
        let mut root = TranslationValue::Map(BTreeMap::new());
        root.insert_path(&["hero"], "Welcome".into());

        root.insert_path(&["hero", "title"], "Ignored".into());

        assert_eq!(serde_json::to_value(&root).unwrap(), json!({"hero": "Welcome"}));
    }
}
