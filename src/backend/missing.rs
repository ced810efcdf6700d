//! Missing-translation error and its markup.

use thiserror::Error;

use crate::resolver::{
    KEY_SEPARATOR,
    last_segment,
    top_level_segment,
};
use crate::store::{
    KeyId,
    KeyStatus,
};
use crate::text::missing_label;
use crate::types::LookupOptions;

/// A lookup that resolved to no value.
///
/// Carries the requested locale, the complete key (scope and plural suffix
/// included) and the options of the original lookup. The options are boxed
/// to keep `Result`s carrying this error small.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("translation missing: {locale}.{key}")]
pub struct MissingTranslation {
    pub locale: String,
    pub key: String,
    pub options: Box<LookupOptions>,
}

impl MissingTranslation {
    #[must_use]
    pub fn new(locale: impl Into<String>, key: impl Into<String>, options: LookupOptions) -> Self {
        Self { locale: locale.into(), key: key.into(), options: Box::new(options) }
    }

    /// Locale followed by every key segment.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        std::iter::once(self.locale.as_str()).chain(self.key.split(KEY_SEPARATOR)).collect()
    }

    /// Top-level key segment.
    #[must_use]
    pub fn category(&self) -> &str {
        top_level_segment(&self.key)
    }

    /// Readable label built from the last key segment (`sign_in` → `Sign In`).
    #[must_use]
    pub fn label(&self) -> String {
        missing_label(last_segment(&self.key))
    }

    /// `<span class="translation_missing" ...>` without inspector attributes.
    #[must_use]
    pub fn plain_html(&self) -> String {
        format!(
            r#"<span class="translation_missing" title="translation missing: {}">{}</span>"#,
            self.key,
            self.label()
        )
    }

    /// Missing-translation span carrying the inspector attributes of the stored key.
    #[must_use]
    pub fn inspector_html(&self, status: KeyStatus, id: KeyId) -> String {
        format!(
            r#"<span class="translation_missing tc-inspector-key" data-locale='{}' data-type="{status}" data-id="{id}" title="translation missing: {}">{}</span>"#,
            self.locale,
            self.key,
            self.label()
        )
    }
}
