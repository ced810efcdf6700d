//! Inspector markup around served translations.

use crate::config::InspectorMode;
use crate::resolver::top_level_segment;
use crate::store::{
    KeyId,
    KeyStatus,
};

/// Keys under this category belong to the admin UI and are never inspected.
pub const INSPECTOR_EXCLUDED_CATEGORY: &str = "translation_center";

/// Whether a value served for `key_name` gets wrapped in an inspector span.
#[must_use]
pub fn should_wrap(mode: InspectorMode, key_name: &str) -> bool {
    mode == InspectorMode::All && top_level_segment(key_name) != INSPECTOR_EXCLUDED_CATEGORY
}

/// Wraps `text` in a span exposing the key to the inspector.
#[must_use]
pub fn inspector_span(text: &str, locale: &str, status: KeyStatus, id: KeyId) -> String {
    format!(
        "<span class='tc-inspector-key' data-locale='{locale}' data-type='{status}' data-id='{id}'> {text} </span>"
    )
}
