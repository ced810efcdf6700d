//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパーを提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use chrono::{
    DateTime,
    Utc,
};
use rstest::fixture;

use crate::backend::MissingTranslation;
use crate::config::{
    LanguageConfig,
    Settings,
    TextDirection,
};
use crate::store::{
    KeyId,
    MemoryStore,
    NewTranslation,
    StoreError,
    Translation,
    TranslationKey,
    TranslationStatus,
    TranslationStore,
    Translator,
};
use crate::types::{
    LookupOptions,
    TranslationValue,
};

/// 有効化された設定（`en` と `de` を利用可能）
#[fixture]
pub(crate) fn enabled_settings() -> Settings {
    Settings {
        enabled: true,
        lang: BTreeMap::from([
            ("en".to_string(), LanguageConfig { name: "English".to_string(), direction: TextDirection::Ltr }),
            ("de".to_string(), LanguageConfig { name: "Deutsch".to_string(), direction: TextDirection::Ltr }),
        ]),
        ..Settings::default()
    }
}

/// 完全なキーを `static:{locale}.{key}` として返す静的ソース
pub(crate) fn static_source(
    locale: &str,
    key: &str,
    options: &LookupOptions,
) -> Result<TranslationValue, MissingTranslation> {
    let complete_key = crate::resolver::prepare_key(locale, key, options);
    Ok(TranslationValue::Text(format!("static:{locale}.{complete_key}")))
}

/// `key` に承認済みの翻訳を追加する
pub(crate) fn accept<T: TranslationStore + ?Sized>(
    store: &T,
    key: &TranslationKey,
    locale: &str,
    value: &str,
) -> Translation {
    store
        .insert_translation(NewTranslation {
            key_id: key.id,
            locale: locale.to_string(),
            value: value.to_string(),
            status: TranslationStatus::Accepted,
            translator_id: None,
        })
        .unwrap()
}

/// 呼び出し回数を記録する [`MemoryStore`] のラッパー
///
/// `refusing_translators` で作成すると翻訳者の作成を拒否する。
#[derive(Debug, Default)]
pub(crate) struct SpyStore {
    /// 委譲先
    inner: MemoryStore,
    /// 全メソッドの呼び出し回数
    calls: AtomicUsize,
    /// `insert_translation` の成功回数
    inserted: AtomicUsize,
    /// 翻訳者の作成を拒否するか
    refuse_translators: bool,
}

impl SpyStore {
    pub(crate) fn refusing_translators() -> Self {
        Self { refuse_translators: true, ..Self::default() }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn inserted_translations(&self) -> usize {
        self.inserted.load(Ordering::SeqCst)
    }

    /// 呼び出しを記録する
    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl TranslationStore for SpyStore {
    fn find_key(&self, name: &str) -> Result<Option<TranslationKey>, StoreError> {
        self.record();
        self.inner.find_key(name)
    }

    fn create_key(&self, name: &str) -> Result<TranslationKey, StoreError> {
        self.record();
        self.inner.create_key(name)
    }

    fn touch_key(&self, id: KeyId, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.record();
        self.inner.touch_key(id, at)
    }

    fn translations_in(&self, key: KeyId, locale: &str) -> Result<Vec<Translation>, StoreError> {
        self.record();
        self.inner.translations_in(key, locale)
    }

    fn insert_translation(&self, translation: NewTranslation) -> Result<Translation, StoreError> {
        self.record();
        let inserted = self.inner.insert_translation(translation)?;
        self.inserted.fetch_add(1, Ordering::SeqCst);
        Ok(inserted)
    }

    fn child_keys(&self, key: &TranslationKey) -> Result<Vec<TranslationKey>, StoreError> {
        self.record();
        self.inner.child_keys(key)
    }

    fn find_translator(
        &self,
        identifier_type: &str,
        identifier: &str,
    ) -> Result<Option<Translator>, StoreError> {
        self.record();
        self.inner.find_translator(identifier_type, identifier)
    }

    fn create_translator(
        &self,
        identifier_type: &str,
        identifier: &str,
    ) -> Result<Translator, StoreError> {
        self.record();
        if self.refuse_translators {
            return Err(StoreError::Unavailable("translator creation refused".to_string()));
        }
        self.inner.create_translator(identifier_type, identifier)
    }
}
