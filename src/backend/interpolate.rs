//! `%{name}` placeholder substitution.

/// Replaces every `%{name}` in `template` with the matching value.
///
/// Placeholders without a value are left in place.
#[must_use]
pub fn interpolate(template: &str, pairs: &[(&str, String)]) -> String {
    pairs.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("%{{{name}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn interpolate_replaces_named_placeholder() {
        assert_that!(interpolate("Hi %{name}", &[("name", "Ann".to_string())]), eq("Hi Ann"));
    }

    #[rstest]
    fn interpolate_replaces_every_occurrence() {
        let pairs = [("name", "Ann".to_string()), ("count", "2".to_string())];

        assert_that!(
            interpolate("%{name}, %{name} has %{count} messages", &pairs),
            eq("Ann, Ann has 2 messages")
        );
    }

    #[rstest]
    fn interpolate_keeps_unknown_placeholders() {
        assert_that!(interpolate("Hi %{name}", &[("other", "x".to_string())]), eq("Hi %{name}"));
    }

    #[rstest]
    fn interpolate_ignores_other_brace_styles() {
        assert_that!(
            interpolate("{name} {{name}} %{name}", &[("name", "Ann".to_string())]),
            eq("{name} {{name}} Ann")
        );
    }
}
