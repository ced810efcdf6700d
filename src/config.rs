//! Backend configuration.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::{
    ConfigManager,
    DEFAULT_ENVIRONMENT,
};
pub use types::{
    ConfigError,
    I18nSource,
    InspectorMode,
    LanguageConfig,
    Settings,
    TextDirection,
    ValidationError,
};
