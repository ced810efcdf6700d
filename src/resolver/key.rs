//! Complete-key construction.

use super::plural::PluralCategory;
use crate::types::LookupOptions;

/// Separator between key segments.
pub const KEY_SEPARATOR: &str = ".";

/// Prefix marking keys that are served from the translation store.
pub const CUSTOMER_KEY_ROOT: &str = "customer.";

/// Builds the complete lookup key from `key`, the scope and the plural count.
///
/// A blank key is returned unchanged. The plural category is appended whenever a
/// count is present, including `0`.
///
/// # Examples
/// ```
/// use translation_center::resolver::prepare_key;
/// use translation_center::types::LookupOptions;
///
/// let options = LookupOptions::new().with_scope(["home"]).with_count(2);
/// assert_eq!(prepare_key("en", "item", &options), "home.item.other");
/// ```
#[must_use]
pub fn prepare_key(locale: &str, key: &str, options: &LookupOptions) -> String {
    if key.trim().is_empty() {
        return key.to_string();
    }

    let scope = options.scope.join(KEY_SEPARATOR);
    let mut complete_key =
        if scope.is_empty() { key.to_string() } else { format!("{scope}{KEY_SEPARATOR}{key}") };

    if let Some(count) = options.count {
        let category = PluralCategory::for_count(locale, count);
        complete_key.push_str(KEY_SEPARATOR);
        complete_key.push_str(category.as_str());
    }

    complete_key
}

/// Returns the store name for a `customer.` key, or `None` for keys served statically.
#[must_use]
pub fn customer_store_name(complete_key: &str) -> Option<&str> {
    complete_key.strip_prefix(CUSTOMER_KEY_ROOT)
}

/// First segment of a dotted key (`translation_center.admin.title` → `translation_center`).
#[must_use]
pub fn top_level_segment(key: &str) -> &str {
    key.split(KEY_SEPARATOR).next().unwrap_or(key)
}

/// Last segment of a dotted key (`home.hero.title` → `title`).
#[must_use]
pub fn last_segment(key: &str) -> &str {
    key.rsplit(KEY_SEPARATOR).next().unwrap_or(key)
}

/// Checks if `child_key` is a descendant of `parent_key` (`home.hero` under `home`).
#[must_use]
pub fn is_child_key(child_key: &str, parent_key: &str) -> bool {
    let Some(remainder) = child_key.strip_prefix(parent_key) else {
        return false;
    };

    remainder.len() > KEY_SEPARATOR.len() && remainder.starts_with(KEY_SEPARATOR)
}
