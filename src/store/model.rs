//! Records held by a translation store.

use std::fmt;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::resolver::{
    last_segment,
    top_level_segment,
};

pub type KeyId = u64;
pub type TranslationId = u64;
pub type TranslatorId = u64;

/// Locale that receives auto-generated default translations.
pub const DEFAULT_LOCALE: &str = "en";

/// A translatable key, stored without the `customer.` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationKey {
    pub id: KeyId,
    /// Dotted name, unique across the store (e.g. `home.title`).
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Updated on every store-backed lookup of this key.
    pub last_accessed: Option<DateTime<Utc>>,
}

impl TranslationKey {
    /// Top-level name segment (`home.title` → `home`).
    #[must_use]
    pub fn category(&self) -> &str {
        top_level_segment(&self.name)
    }

    #[must_use]
    pub fn last_segment(&self) -> &str {
        last_segment(&self.name)
    }
}

/// Review state of a single translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    Pending,
    Accepted,
}

/// A value of one key in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub id: TranslationId,
    pub key_id: KeyId,
    pub locale: String,
    pub value: String,
    pub status: TranslationStatus,
    /// Author of the value; `None` for values written outside any account.
    pub translator_id: Option<TranslatorId>,
    pub created_at: DateTime<Utc>,
}

impl Translation {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.status == TranslationStatus::Accepted
    }
}

/// Input for inserting a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTranslation {
    pub key_id: KeyId,
    pub locale: String,
    pub value: String,
    pub status: TranslationStatus,
    pub translator_id: Option<TranslatorId>,
}

/// Translation state of a key in one locale, as shown by the inspector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    /// An accepted translation exists.
    Translated,
    /// Translations exist, none accepted yet.
    Pending,
    /// No translation exists.
    Untranslated,
}

impl KeyStatus {
    /// Derives the status from every translation of a key in a single locale.
    #[must_use]
    pub fn from_translations(translations: &[Translation]) -> Self {
        if translations.iter().any(Translation::is_accepted) {
            Self::Translated
        } else if translations.is_empty() {
            Self::Untranslated
        } else {
            Self::Pending
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Translated => "translated",
            Self::Pending => "pending",
            Self::Untranslated => "untranslated",
        }
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account that authors translations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translator {
    pub id: TranslatorId,
    /// Name of the identifying field (e.g. `email`).
    pub identifier_type: String,
    pub identifier: String,
}
