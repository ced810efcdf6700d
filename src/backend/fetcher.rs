//! Store-aware translation lookup.

use std::fmt;

use chrono::Utc;
use thiserror::Error;

use super::inspector::{
    INSPECTOR_EXCLUDED_CATEGORY,
    inspector_span,
    should_wrap,
};
use super::interpolate::interpolate;
use super::{
    MissingTranslation,
    StaticSource,
};
use crate::config::{
    I18nSource,
    InspectorMode,
    Settings,
};
use crate::resolver::{
    customer_store_name,
    prepare_key,
};
use crate::store::{
    DEFAULT_LOCALE,
    StoreError,
    TranslationKey,
    TranslationStore,
    Translator,
};
use crate::translator::provision_system_translator;
use crate::types::{
    LookupOptions,
    TranslationValue,
};

/// Errors returned by [`TranslationBackend::translate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error(transparent)]
    Missing(#[from] MissingTranslation),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The locale is not configured under `lang`.
    #[error("Locale '{0}' is not available")]
    UnavailableLocale(String),
}

/// Translation backend decorating a static source with a translation store.
///
/// Keys under `customer.` are registered in the store on every lookup and,
/// depending on `i18n_source`, served from it. Everything else goes straight
/// to the static source.
pub struct TranslationBackend<S, T> {
    /// 設定
    settings: Settings,
    /// ファイルベースの翻訳ソース
    source: S,
    /// 翻訳ストア
    store: T,
    /// デフォルト翻訳の作成者（プロビジョニング失敗時は None）
    system_translator: Option<Translator>,
}

impl<S, T> fmt::Debug for TranslationBackend<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationBackend")
            .field("settings", &self.settings)
            .field("source", &"<static source>")
            .field("store", &"<translation store>")
            .field("system_translator", &self.system_translator)
            .finish()
    }
}

impl<S, T> TranslationBackend<S, T>
where
    S: StaticSource,
    T: TranslationStore,
{
    /// Builds a backend, provisioning the system translator when default
    /// translations are enabled.
    ///
    /// A translator that cannot be provisioned is logged; the backend then
    /// serves lookups without creating defaults.
    #[must_use]
    pub fn new(settings: Settings, source: S, store: T) -> Self {
        let system_translator = if settings.enabled && settings.save_default_translation {
            provision_system_translator(&store, &settings)
                .inspect_err(|e| tracing::warn!("Default translations disabled: {e}"))
                .ok()
        } else {
            None
        };

        Self { settings, source, store, system_translator }
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn store(&self) -> &T {
        &self.store
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn system_translator(&self) -> Option<&Translator> {
        self.system_translator.as_ref()
    }

    /// Looks up `key` in `locale`.
    ///
    /// # Errors
    /// - [`BackendError::UnavailableLocale`] for locales outside `lang`
    /// - [`BackendError::Missing`] when neither store nor source hold a value
    /// - [`BackendError::Store`] when the store fails
    pub fn translate(
        &self,
        locale: &str,
        key: &str,
        options: &LookupOptions,
    ) -> Result<TranslationValue, BackendError> {
        if !self.settings.supports_locale(locale) {
            return Err(BackendError::UnavailableLocale(locale.to_string()));
        }

        if !self.settings.enabled {
            return Ok(self.source.lookup(locale, key, options)?);
        }

        let complete_key = prepare_key(locale, key, options);
        let Some(store_name) = customer_store_name(&complete_key).filter(|name| !name.is_empty())
        else {
            tracing::debug!(key = complete_key.as_str(), "Not a store key, delegating to static source");
            return Ok(self.source.lookup(locale, key, options)?);
        };

        let translation_key = self.store.find_or_create_key(store_name)?;
        self.store.touch_key(translation_key.id, Utc::now())?;
        let has_children = self.store.has_children(&translation_key)?;

        if self.settings.save_default_translation && !has_children {
            self.ensure_default_translation(&translation_key)?;
        }

        if self.settings.i18n_source == I18nSource::Db && !options.prefer_static {
            return self.translate_from_store(locale, &complete_key, &translation_key, has_children, options);
        }

        match self.source.lookup(locale, key, options)? {
            TranslationValue::Text(text) => {
                Ok(TranslationValue::Text(self.wrap(&text, &translation_key, locale)?))
            }
            map @ TranslationValue::Map(_) => Ok(map),
        }
    }

    /// Like [`Self::translate`], but renders a missing translation as markup.
    pub fn translate_or_render(
        &self,
        locale: &str,
        key: &str,
        options: &LookupOptions,
    ) -> Result<TranslationValue, BackendError> {
        match self.translate(locale, key, options) {
            Err(BackendError::Missing(missing)) => {
                Ok(TranslationValue::Text(self.render_missing(&missing)?))
            }
            other => other,
        }
    }

    /// Markup shown in place of a missing translation.
    ///
    /// Inspector attributes are added only for store keys that exist and only
    /// when the inspector is on.
    pub fn render_missing(&self, missing: &MissingTranslation) -> Result<String, StoreError> {
        if self.settings.inspector == InspectorMode::Off
            || missing.category() == INSPECTOR_EXCLUDED_CATEGORY
        {
            return Ok(missing.plain_html());
        }

        let stored = customer_store_name(&missing.key)
            .map(|name| self.store.find_key(name))
            .transpose()?
            .flatten();

        stored.map_or_else(
            || Ok(missing.plain_html()),
            |key| {
                let status = self.store.key_status(key.id, &missing.locale)?;
                Ok(missing.inspector_html(status, key.id))
            },
        )
    }

    /// Serves a store key from its accepted translation.
    fn translate_from_store(
        &self,
        locale: &str,
        complete_key: &str,
        key: &TranslationKey,
        has_children: bool,
        options: &LookupOptions,
    ) -> Result<TranslationValue, BackendError> {
        if has_children {
            return Ok(self.store.child_translations(key, locale)?);
        }

        let value = self
            .store
            .accepted_translation(key.id, locale)?
            .map(|translation| translation.value)
            .or_else(|| options.default.clone())
            .map(|template| interpolate(&template, &options.interpolation_pairs()))
            .filter(|value| !value.trim().is_empty());

        match value {
            Some(value) => Ok(TranslationValue::Text(self.wrap(&value, key, locale)?)),
            None => Err(MissingTranslation::new(locale, complete_key, options.clone()).into()),
        }
    }

    /// Creates the English default of `key` unless it already has one.
    fn ensure_default_translation(&self, key: &TranslationKey) -> Result<(), StoreError> {
        if !self.store.translations_in(key.id, DEFAULT_LOCALE)?.is_empty() {
            return Ok(());
        }

        let Some(translator) = &self.system_translator else {
            tracing::debug!(key = key.name.as_str(), "No system translator, skipping default translation");
            return Ok(());
        };

        match self.store.create_default_translation(key, translator) {
            Ok(translation) => {
                tracing::info!(
                    key = key.name.as_str(),
                    value = translation.value.as_str(),
                    "Created default translation"
                );
                Ok(())
            }
            // Another request created it first.
            Err(StoreError::Conflict(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Wraps `text` for the inspector when the mode asks for it.
    fn wrap(&self, text: &str, key: &TranslationKey, locale: &str) -> Result<String, StoreError> {
        if !should_wrap(self.settings.inspector, &key.name) {
            return Ok(text.to_string());
        }

        let status = self.store.key_status(key.id, locale)?;
        Ok(inspector_span(text, locale, status, key.id))
    }
}
