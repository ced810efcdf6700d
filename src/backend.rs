//! Translation backend.
//!
//! Decorates a static translation source: keys under `customer.` are
//! registered in a translation store and, when configured, served from it.

/// Store-aware lookup
mod fetcher;
/// Inspector markup
pub mod inspector;
/// `%{name}` substitution
pub mod interpolate;
/// Missing-translation error and markup
mod missing;
/// Static source abstraction
mod source;

pub use fetcher::{
    BackendError,
    TranslationBackend,
};
pub use missing::MissingTranslation;
pub use source::StaticSource;
