//! Thousands-separator number formatting.
//!
//! Formatting never touches process locale state. Callers resolve a
//! [`NumberFormat`] once (from the environment, config, or explicitly) and pass
//! it to whatever renders a table.

use serde::{Deserialize, Serialize};

/// Digit grouping used for human-readable counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Inserted between each group of three digits
    pub thousands_separator: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::with_separator(",")
    }
}

impl NumberFormat {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            thousands_separator: separator.into(),
        }
    }

    /// Grouping for a POSIX locale name such as `de_DE.UTF-8`.
    ///
    /// Unknown locales, `C` and `POSIX` fall back to a comma.
    pub fn for_locale(name: &str) -> Self {
        let language = name
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('-', "_");
        let separator = match language.as_str() {
            "de_CH" | "it_CH" | "fr_CH" => "'",
            "fr_FR" | "fr_CA" | "fr_BE" | "ru_RU" | "pl_PL" | "cs_CZ" | "sv_SE" | "fi_FI"
            | "nb_NO" | "uk_UA" => "\u{202f}",
            "de_DE" | "de_AT" | "es_ES" | "it_IT" | "nl_NL" | "pt_BR" | "pt_PT" | "id_ID"
            | "tr_TR" | "da_DK" | "el_GR" => ".",
            _ => match language.split('_').next().unwrap_or_default() {
                "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" | "el" => ".",
                "fr" | "ru" | "pl" | "cs" | "sv" | "fi" | "nb" | "uk" => "\u{202f}",
                _ => ",",
            },
        };
        Self::with_separator(separator)
    }

    /// Resolve from `LC_ALL`, `LC_NUMERIC`, then `LANG`.
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_NUMERIC", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|value| Self::for_locale(&value))
            .unwrap_or_default()
    }

    /// Format `n` with grouped digits.
    pub fn format(&self, n: u64) -> String {
        let digits = n.to_string();
        let len = digits.len();
        let mut out = String::with_capacity(len + (len / 3) * self.thousands_separator.len());
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push_str(&self.thousands_separator);
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse_back(formatted: &str, format: &NumberFormat) -> u64 {
        formatted
            .replace(&format.thousands_separator, "")
            .parse()
            .unwrap()
    }

    #[test]
    fn test_format_boundaries() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.format(0), "0");
        assert_eq!(fmt.format(999), "999");
        assert_eq!(fmt.format(1000), "1,000");
        assert_eq!(fmt.format(1234567), "1,234,567");
        assert_eq!(fmt.format(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_round_trip_known_values() {
        let fmt = NumberFormat::default();
        for n in [0, 999, 1000, 1234567] {
            assert_eq!(parse_back(&fmt.format(n), &fmt), n);
        }
    }

    #[test]
    fn test_for_locale() {
        assert_eq!(NumberFormat::for_locale("en_US.UTF-8").thousands_separator, ",");
        assert_eq!(NumberFormat::for_locale("de_DE.UTF-8").thousands_separator, ".");
        assert_eq!(NumberFormat::for_locale("de_CH").thousands_separator, "'");
        assert_eq!(NumberFormat::for_locale("fr_FR@euro").thousands_separator, "\u{202f}");
        assert_eq!(NumberFormat::for_locale("es_ES").thousands_separator, ".");
        assert_eq!(NumberFormat::for_locale("C").thousands_separator, ",");
        assert_eq!(NumberFormat::for_locale("POSIX").thousands_separator, ",");
    }

    #[test]
    fn test_multibyte_separator() {
        let fmt = NumberFormat::for_locale("fr_FR");
        assert_eq!(fmt.format(1234567), "1\u{202f}234\u{202f}567");
    }

    proptest! {
        #[test]
        fn prop_format_round_trips(
            n in any::<u64>(),
            sep in prop::sample::select(vec![",", ".", "'", "\u{202f}"]),
        ) {
            let fmt = NumberFormat::with_separator(sep);
            prop_assert_eq!(parse_back(&fmt.format(n), &fmt), n);
        }
    }
}
