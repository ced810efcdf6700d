use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// Path to the field (e.g., "lang.en.name")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("No '{environment}' section in {}", path.display())]
    MissingEnvironment { environment: String, path: PathBuf },
}

/// 検証エラーを1行ずつ整形する
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// When translations are wrapped in inspector markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectorMode {
    /// Never; missing translations render as plain spans.
    Off,
    /// Only missing translations carry inspector attributes.
    #[default]
    Missing,
    /// Every store-backed translation is wrapped.
    All,
}

/// Where `customer.` keys are served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum I18nSource {
    /// Static locale files.
    #[default]
    Yaml,
    /// The translation store.
    Db,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Display name (e.g. "English").
    pub name: String,
    pub direction: TextDirection,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self { name: "English".to_string(), direction: TextDirection::Ltr }
    }
}

/// Backend settings for one environment.
///
/// Loaded once at start-up and never mutated afterwards; absent fields take the
/// values of [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Route `customer.` keys through the store. When off every lookup goes to
    /// the static source.
    pub enabled: bool,

    pub inspector: InspectorMode,

    pub i18n_source: I18nSource,

    /// Create an English placeholder for new leaf keys.
    pub save_default_translation: bool,

    /// Field identifying translator accounts (e.g. `email`).
    pub identifier_type: String,

    /// Account model owning translations (e.g. `User`).
    pub translator_type: String,

    /// Identifier of the system translator that owns default translations.
    pub yaml_translator_identifier: String,

    /// Supported locales.
    pub lang: BTreeMap<String, LanguageConfig>,
}

impl Settings {
    /// # Errors
    /// - No language configured
    /// - Translator identification fields are empty
    /// - A language has an empty display name
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.lang.is_empty() {
            errors.push(ValidationError::new(
                "lang",
                "At least one language is required. Example: {en: {name: English, direction: ltr}}",
            ));
        }

        for (locale, language) in &self.lang {
            if language.name.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("lang.{locale}.name"),
                    "The language name cannot be empty",
                ));
            }
        }

        if self.identifier_type.is_empty() {
            errors.push(ValidationError::new(
                "identifier_type",
                "The identifier field cannot be empty. Example: \"email\"",
            ));
        }

        if self.translator_type.is_empty() {
            errors.push(ValidationError::new(
                "translator_type",
                "The translator type cannot be empty. Example: \"User\"",
            ));
        }

        if self.yaml_translator_identifier.is_empty() {
            errors.push(ValidationError::new(
                "yaml_translator_identifier",
                "The system translator identifier cannot be empty. Example: \"coder@tc.com\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Locales listed under `lang`, in name order.
    #[must_use]
    pub fn available_locales(&self) -> Vec<&str> {
        self.lang.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn supports_locale(&self, locale: &str) -> bool {
        self.lang.contains_key(locale)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: false,
            inspector: InspectorMode::default(),
            i18n_source: I18nSource::default(),
            save_default_translation: true,
            identifier_type: "email".to_string(),
            translator_type: "User".to_string(),
            yaml_translator_identifier: "coder@tc.com".to_string(),
            lang: BTreeMap::from([("en".to_string(), LanguageConfig::default())]),
        }
    }
}
