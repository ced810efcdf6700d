//! Human-readable renderings of key segments.

/// Whether `c` counts as a word character for capitalization purposes.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Upper-cases the first lowercase letter of every word.
///
/// A letter following an apostrophe inside a word stays as it is (`don't` → `Don't`).
fn capitalize_words(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut prev_prev: Option<char> = None;

    for c in text.chars() {
        let at_boundary = prev.is_none_or(|p| !is_word_char(p));
        let after_inner_apostrophe = prev == Some('\'') && prev_prev.is_some_and(is_word_char);

        if at_boundary && !after_inner_apostrophe && c.is_lowercase() {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }

        prev_prev = prev;
        prev = Some(c);
    }

    result
}

/// Label used for a missing translation (`sign_in` → `Sign In`).
#[must_use]
pub fn missing_label(segment: &str) -> String {
    capitalize_words(&segment.replace('_', " "))
}

/// Title used as the default English value of a new key.
///
/// Splits camel case, treats `_` and `-` as spaces, drops a trailing `_id` and
/// capitalizes every word (`user_id` → `User`, `signInButton` → `Sign In Button`).
#[must_use]
pub fn titleize(segment: &str) -> String {
    let mut words = String::with_capacity(segment.len() + 4);
    let mut prev: Option<char> = None;

    for c in segment.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            words.push('_');
        }
        words.extend(c.to_lowercase());
        prev = Some(c);
    }

    let words = words.replace('-', "_");
    let words = words.strip_suffix("_id").filter(|w| !w.is_empty()).unwrap_or(&words);
    let words = words.trim_start_matches('_').replace('_', " ");

    capitalize_words(words.trim())
}
