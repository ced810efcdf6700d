//! Static translation source consulted for non-store keys.

use super::MissingTranslation;
use crate::types::{
    LookupOptions,
    TranslationValue,
};

/// File-based translation lookup that the backend decorates.
///
/// Receives the raw key and the original options; resolving scope and plural
/// suffix is up to the source.
pub trait StaticSource {
    fn lookup(
        &self,
        locale: &str,
        key: &str,
        options: &LookupOptions,
    ) -> Result<TranslationValue, MissingTranslation>;
}

impl<F> StaticSource for F
where
    F: Fn(&str, &str, &LookupOptions) -> Result<TranslationValue, MissingTranslation>,
{
    fn lookup(
        &self,
        locale: &str,
        key: &str,
        options: &LookupOptions,
    ) -> Result<TranslationValue, MissingTranslation> {
        self(locale, key, options)
    }
}
