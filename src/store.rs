//! Translation store abstraction.
//!
//! The store holds translation keys, their per-locale translations and the
//! translator accounts that wrote them. Implementations only provide the
//! primitive reads and writes; the composite operations used by the backend
//! (find-or-create, status, children) are default methods built on top.

mod memory;
mod model;

use std::collections::BTreeMap;

use chrono::{
    DateTime,
    Utc,
};
use thiserror::Error;

pub use memory::MemoryStore;
pub use model::{
    DEFAULT_LOCALE,
    KeyId,
    KeyStatus,
    NewTranslation,
    Translation,
    TranslationId,
    TranslationKey,
    TranslationStatus,
    Translator,
    TranslatorId,
};

use crate::resolver::KEY_SEPARATOR;
use crate::text::titleize;
use crate::types::TranslationValue;

/// Lookup-then-create attempts before giving up on a contended key name.
pub const MAX_CREATE_ATTEMPTS: usize = 3;

/// Errors raised by a translation store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("'{0}' already exists")]
    Conflict(String),

    #[error("Translation key #{0} does not exist")]
    UnknownKey(KeyId),

    #[error("Translation store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for translation keys, translations and translators.
///
/// Methods take `&self`; implementations synchronize internally so that one
/// store can serve concurrent requests.
pub trait TranslationStore {
    fn find_key(&self, name: &str) -> Result<Option<TranslationKey>, StoreError>;

    /// Inserts a new key.
    ///
    /// # Errors
    /// [`StoreError::Conflict`] when a key with the same name already exists.
    fn create_key(&self, name: &str) -> Result<TranslationKey, StoreError>;

    /// Sets the last-accessed timestamp of a key.
    fn touch_key(&self, id: KeyId, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// All translations of a key in `locale`, whatever their status.
    fn translations_in(&self, key: KeyId, locale: &str) -> Result<Vec<Translation>, StoreError>;

    fn insert_translation(&self, translation: NewTranslation) -> Result<Translation, StoreError>;

    /// Keys nested below `key`, ordered by name.
    fn child_keys(&self, key: &TranslationKey) -> Result<Vec<TranslationKey>, StoreError>;

    fn find_translator(
        &self,
        identifier_type: &str,
        identifier: &str,
    ) -> Result<Option<Translator>, StoreError>;

    /// # Errors
    /// [`StoreError::Conflict`] when the identifier is already taken.
    fn create_translator(
        &self,
        identifier_type: &str,
        identifier: &str,
    ) -> Result<Translator, StoreError>;

    /// Returns the key named `name`, creating it when absent.
    ///
    /// Lookup and insert are not atomic: a concurrent insert of the same name
    /// surfaces as a conflict and the lookup is retried.
    fn find_or_create_key(&self, name: &str) -> Result<TranslationKey, StoreError> {
        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            if let Some(key) = self.find_key(name)? {
                return Ok(key);
            }

            match self.create_key(name) {
                Ok(key) => {
                    tracing::info!(key = name, id = key.id, "Created translation key");
                    return Ok(key);
                }
                Err(StoreError::Conflict(_)) => {
                    tracing::debug!(key = name, attempt, "Key created concurrently, retrying lookup");
                }
                Err(e) => return Err(e),
            }
        }

        Err(StoreError::Conflict(name.to_string()))
    }

    /// The accepted translation of a key in `locale`, if any.
    fn accepted_translation(
        &self,
        key: KeyId,
        locale: &str,
    ) -> Result<Option<Translation>, StoreError> {
        Ok(self.translations_in(key, locale)?.into_iter().find(Translation::is_accepted))
    }

    fn has_children(&self, key: &TranslationKey) -> Result<bool, StoreError> {
        Ok(!self.child_keys(key)?.is_empty())
    }

    fn key_status(&self, key: KeyId, locale: &str) -> Result<KeyStatus, StoreError> {
        Ok(KeyStatus::from_translations(&self.translations_in(key, locale)?))
    }

    /// Accepted translations of every descendant of `key` in `locale`, nested by
    /// name segment relative to `key`. Descendants without an accepted value are
    /// left out.
    fn child_translations(
        &self,
        key: &TranslationKey,
        locale: &str,
    ) -> Result<TranslationValue, StoreError> {
        let mut children = TranslationValue::Map(BTreeMap::new());

        for child in self.child_keys(key)? {
            let Some(translation) = self.accepted_translation(child.id, locale)? else {
                continue;
            };
            let Some(relative) = child
                .name
                .strip_prefix(key.name.as_str())
                .and_then(|rest| rest.strip_prefix(KEY_SEPARATOR))
            else {
                continue;
            };

            let path: Vec<&str> = relative.split(KEY_SEPARATOR).collect();
            children.insert_path(&path, TranslationValue::Text(translation.value));
        }

        Ok(children)
    }

    /// Stores the titleized last name segment as the accepted English value of `key`.
    fn create_default_translation(
        &self,
        key: &TranslationKey,
        translator: &Translator,
    ) -> Result<Translation, StoreError> {
        self.insert_translation(NewTranslation {
            key_id: key.id,
            locale: DEFAULT_LOCALE.to_string(),
            value: titleize(key.last_segment()),
            status: TranslationStatus::Accepted,
            translator_id: Some(translator.id),
        })
    }
}
