//! Locale-aware plural category selection.
//!
//! Categories follow CLDR cardinal rules for integer counts. The category set
//! has no `zero`: languages whose CLDR rules define one fall back to `other`.

use std::fmt;

/// Grammatical plural category appended to a key as its final segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// All categories, in key-suffix order.
    pub const ALL: [Self; 5] = [Self::One, Self::Two, Self::Few, Self::Many, Self::Other];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }

    /// Selects the category for `count` in `locale` (`en`, `en-US`, `pt_BR`, ...).
    #[must_use]
    pub fn for_count(locale: &str, count: i64) -> Self {
        PluralRule::for_locale(locale).categorize(count.unsigned_abs())
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule families shared by groups of languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// 1 → one, everything else → other (English, German, Spanish, ...).
    OneOther,
    /// 0 and 1 → one (French).
    OneUptoTwoOther,
    /// Russian, Ukrainian, Belarusian.
    EastSlavic,
    /// Czech, Slovak.
    WestSlavic,
    Polish,
    Romanian,
    Slovenian,
    Irish,
    Hebrew,
    Arabic,
    /// Languages without grammatical number (Japanese, Chinese, ...).
    OtherOnly,
}

impl PluralRule {
    /// Looks up the rule by the primary language subtag of `locale`.
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        let language = locale.split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();

        match language.as_str() {
            "fr" | "ff" | "kab" => Self::OneUptoTwoOther,
            "ru" | "uk" | "be" => Self::EastSlavic,
            "cs" | "sk" => Self::WestSlavic,
            "pl" => Self::Polish,
            "ro" | "mo" => Self::Romanian,
            "sl" => Self::Slovenian,
            "ga" => Self::Irish,
            "he" | "iw" => Self::Hebrew,
            "ar" => Self::Arabic,
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "km" | "lo" | "my" => Self::OtherOnly,
            _ => Self::OneOther,
        }
    }

    #[must_use]
    pub fn categorize(self, n: u64) -> PluralCategory {
        let mod10 = n % 10;
        let mod100 = n % 100;

        match self {
            Self::OneOther => {
                if n == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::OneUptoTwoOther => {
                if n < 2 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            Self::EastSlavic => {
                if mod10 == 1 && mod100 != 11 {
                    PluralCategory::One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            Self::WestSlavic => match n {
                1 => PluralCategory::One,
                2..=4 => PluralCategory::Few,
                _ => PluralCategory::Other,
            },
            Self::Polish => {
                if n == 1 {
                    PluralCategory::One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            Self::Romanian => {
                if n == 1 {
                    PluralCategory::One
                } else if n == 0 || (1..=19).contains(&mod100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Other
                }
            }
            Self::Slovenian => match mod100 {
                1 => PluralCategory::One,
                2 => PluralCategory::Two,
                3 | 4 => PluralCategory::Few,
                _ => PluralCategory::Other,
            },
            Self::Irish => match n {
                1 => PluralCategory::One,
                2 => PluralCategory::Two,
                3..=6 => PluralCategory::Few,
                7..=10 => PluralCategory::Many,
                _ => PluralCategory::Other,
            },
            Self::Hebrew => match n {
                1 => PluralCategory::One,
                2 => PluralCategory::Two,
                _ => PluralCategory::Other,
            },
            Self::Arabic => match (n, mod100) {
                (1, _) => PluralCategory::One,
                (2, _) => PluralCategory::Two,
                (_, 3..=10) => PluralCategory::Few,
                (_, 11..=99) => PluralCategory::Many,
                _ => PluralCategory::Other,
            },
            Self::OtherOnly => PluralCategory::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::english_one("en", 1, PluralCategory::One)]
    #[case::english_zero("en", 0, PluralCategory::Other)]
    #[case::english_many("en", 5, PluralCategory::Other)]
    #[case::english_negative_one("en", -1, PluralCategory::One)]
    #[case::region_subtag("en-GB", 1, PluralCategory::One)]
    #[case::french_zero("fr", 0, PluralCategory::One)]
    #[case::french_two("fr-CA", 2, PluralCategory::Other)]
    #[case::russian_one("ru", 21, PluralCategory::One)]
    #[case::russian_eleven("ru", 11, PluralCategory::Many)]
    #[case::russian_few("ru", 23, PluralCategory::Few)]
    #[case::russian_teen("ru", 13, PluralCategory::Many)]
    #[case::czech_few("cs", 3, PluralCategory::Few)]
    #[case::czech_other("cs", 5, PluralCategory::Other)]
    #[case::polish_twenty_two("pl", 22, PluralCategory::Few)]
    #[case::polish_twenty_one("pl", 21, PluralCategory::Many)]
    #[case::romanian_zero("ro", 0, PluralCategory::Few)]
    #[case::romanian_twenty("ro", 20, PluralCategory::Other)]
    #[case::slovenian_two("sl", 102, PluralCategory::Two)]
    #[case::irish_many("ga", 8, PluralCategory::Many)]
    #[case::hebrew_two("he", 2, PluralCategory::Two)]
    #[case::arabic_zero("ar", 0, PluralCategory::Other)]
    #[case::arabic_few("ar", 103, PluralCategory::Few)]
    #[case::arabic_many("ar", 11, PluralCategory::Many)]
    #[case::arabic_hundred("ar", 100, PluralCategory::Other)]
    #[case::japanese("ja", 1, PluralCategory::Other)]
    #[case::underscore_separator("pt_BR", 1, PluralCategory::One)]
    #[case::uppercase_tag("RU", 2, PluralCategory::Few)]
    fn for_count_follows_locale_rules(
        #[case] locale: &str,
        #[case] count: i64,
        #[case] expected: PluralCategory,
    ) {
        assert_that!(PluralCategory::for_count(locale, count), eq(expected));
    }

    #[rstest]
    fn display_uses_suffix_name() {
        let names: Vec<String> = PluralCategory::ALL.iter().map(ToString::to_string).collect();

        assert_eq!(names, vec!["one", "two", "few", "many", "other"]);
    }
}
