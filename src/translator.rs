//! System translator provisioning.
//!
//! Auto-generated default translations are attributed to one well-known
//! account, configured by `identifier_type` and `yaml_translator_identifier`.

use thiserror::Error;

use crate::config::Settings;
use crate::store::{
    StoreError,
    TranslationStore,
    Translator,
};

/// The system translator could neither be found nor created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("System translator '{identifier}' unavailable: {source}")]
pub struct TranslatorUnavailable {
    pub identifier: String,
    #[source]
    pub source: StoreError,
}

/// Finds the system translator, creating it on first use.
///
/// Safe to call from several processes at once: losing the creation race
/// falls back to the account the winner created.
pub fn provision_system_translator<T>(
    store: &T,
    settings: &Settings,
) -> Result<Translator, TranslatorUnavailable>
where
    T: TranslationStore + ?Sized,
{
    let identifier_type = settings.identifier_type.as_str();
    let identifier = settings.yaml_translator_identifier.as_str();
    let unavailable = |source| TranslatorUnavailable { identifier: identifier.to_string(), source };

    if let Some(translator) = store.find_translator(identifier_type, identifier).map_err(unavailable)? {
        return Ok(translator);
    }

    match store.create_translator(identifier_type, identifier) {
        Ok(translator) => {
            tracing::info!(identifier, id = translator.id, "Created system translator");
            Ok(translator)
        }
        Err(StoreError::Conflict(conflict)) => store
            .find_translator(identifier_type, identifier)
            .map_err(unavailable)?
            .ok_or_else(|| unavailable(StoreError::Conflict(conflict))),
        Err(e) => Err(unavailable(e)),
    }
}
