//! In-process translation store.

use std::collections::BTreeMap;
use std::sync::{
    Mutex,
    MutexGuard,
};

use chrono::{
    DateTime,
    Utc,
};

use super::{
    KeyId,
    NewTranslation,
    StoreError,
    Translation,
    TranslationId,
    TranslationKey,
    TranslationStore,
    Translator,
    TranslatorId,
};
use crate::resolver::{
    KEY_SEPARATOR,
    is_child_key,
};

/// Tables of the in-memory store.
#[derive(Debug, Default)]
struct MemoryState {
    /// Keys by name; name order keeps descendants contiguous.
    keys: BTreeMap<String, TranslationKey>,
    /// Translation rows in insertion order.
    translations: Vec<Translation>,
    /// Translator rows in insertion order.
    translators: Vec<Translator>,
    /// Last id handed out for a key.
    last_key_id: KeyId,
    /// Last id handed out for a translation.
    last_translation_id: TranslationId,
    /// Last id handed out for a translator.
    last_translator_id: TranslatorId,
}

impl MemoryState {
    /// Name of the key with `id`.
    fn key_name(&self, id: KeyId) -> Option<&str> {
        self.keys.values().find(|key| key.id == id).map(|key| key.name.as_str())
    }
}

/// [`TranslationStore`] kept in memory behind a mutex.
///
/// Enforces the same uniqueness rules a relational store would with unique
/// indexes: key names, (key, locale) for translations and
/// (identifier type, identifier) for translators.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// All tables, guarded together so composite checks stay atomic.
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn key_count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.keys.len())
    }

    /// Every translation of the key named `name`, across locales.
    pub fn translations_of(&self, name: &str) -> Result<Vec<Translation>, StoreError> {
        let state = self.lock()?;
        let Some(key) = state.keys.get(name) else {
            return Ok(Vec::new());
        };
        Ok(state.translations.iter().filter(|t| t.key_id == key.id).cloned().collect())
    }

    /// Locks the tables; a poisoned lock reports the store as unavailable.
    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl TranslationStore for MemoryStore {
    fn find_key(&self, name: &str) -> Result<Option<TranslationKey>, StoreError> {
        Ok(self.lock()?.keys.get(name).cloned())
    }

    fn create_key(&self, name: &str) -> Result<TranslationKey, StoreError> {
        let mut state = self.lock()?;
        if state.keys.contains_key(name) {
            return Err(StoreError::Conflict(name.to_string()));
        }

        state.last_key_id += 1;
        let key = TranslationKey {
            id: state.last_key_id,
            name: name.to_string(),
            created_at: Utc::now(),
            last_accessed: None,
        };
        state.keys.insert(name.to_string(), key.clone());
        drop(state);
        Ok(key)
    }

    fn touch_key(&self, id: KeyId, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.lock()?
            .keys
            .values_mut()
            .find(|key| key.id == id)
            .ok_or(StoreError::UnknownKey(id))?
            .last_accessed = Some(at);
        Ok(())
    }

    fn translations_in(&self, key: KeyId, locale: &str) -> Result<Vec<Translation>, StoreError> {
        Ok(self
            .lock()?
            .translations
            .iter()
            .filter(|t| t.key_id == key && t.locale == locale)
            .cloned()
            .collect())
    }

    fn insert_translation(&self, translation: NewTranslation) -> Result<Translation, StoreError> {
        let mut state = self.lock()?;
        let key_name =
            state.key_name(translation.key_id).ok_or(StoreError::UnknownKey(translation.key_id))?;

        let duplicate = state
            .translations
            .iter()
            .any(|t| t.key_id == translation.key_id && t.locale == translation.locale);
        if duplicate {
            return Err(StoreError::Conflict(format!("{}:{key_name}", translation.locale)));
        }

        state.last_translation_id += 1;
        let stored = Translation {
            id: state.last_translation_id,
            key_id: translation.key_id,
            locale: translation.locale,
            value: translation.value,
            status: translation.status,
            translator_id: translation.translator_id,
            created_at: Utc::now(),
        };
        state.translations.push(stored.clone());
        drop(state);
        Ok(stored)
    }

    fn child_keys(&self, key: &TranslationKey) -> Result<Vec<TranslationKey>, StoreError> {
        let state = self.lock()?;
        let prefix = format!("{}{KEY_SEPARATOR}", key.name);
        Ok(state
            .keys
            .range(prefix.clone()..)
            .take_while(|(name, _)| name.starts_with(&prefix))
            .filter(|(name, _)| is_child_key(name, &key.name))
            .map(|(_, child)| child.clone())
            .collect())
    }

    fn find_translator(
        &self,
        identifier_type: &str,
        identifier: &str,
    ) -> Result<Option<Translator>, StoreError> {
        Ok(self
            .lock()?
            .translators
            .iter()
            .find(|t| t.identifier_type == identifier_type && t.identifier == identifier)
            .cloned())
    }

    fn create_translator(
        &self,
        identifier_type: &str,
        identifier: &str,
    ) -> Result<Translator, StoreError> {
        let mut state = self.lock()?;
        let taken = state
            .translators
            .iter()
            .any(|t| t.identifier_type == identifier_type && t.identifier == identifier);
        if taken {
            return Err(StoreError::Conflict(format!("{identifier_type}:{identifier}")));
        }

        state.last_translator_id += 1;
        let translator = Translator {
            id: state.last_translator_id,
            identifier_type: identifier_type.to_string(),
            identifier: identifier.to_string(),
        };
        state.translators.push(translator.clone());
        drop(state);
        Ok(translator)
    }
}
