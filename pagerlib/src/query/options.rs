//! Options controlling how tables are keyed and formatted.

use std::collections::BTreeMap;

use tracing::warn;

use crate::output::NumberFormat;

/// Maps a country code to its display name.
pub trait CountryResolver {
    /// Display name for `code`, or `None` when unknown.
    fn resolve(&self, code: &str) -> Option<String>;
}

impl<F> CountryResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, code: &str) -> Option<String> {
        self(code)
    }
}

/// Country names loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryNames {
    names: BTreeMap<String, String>,
}

impl CountryNames {
    pub fn new(names: BTreeMap<String, String>) -> Self {
        Self { names }
    }
}

impl CountryResolver for CountryNames {
    fn resolve(&self, code: &str) -> Option<String> {
        self.names.get(code).cloned()
    }
}

/// Options for building exposure and loss tables.
///
/// The default produces raw counts keyed by country code.
#[derive(Default)]
pub struct TableOptions<'a> {
    /// Grouping to apply when rendering human-readable counts
    pub human_readable: Option<NumberFormat>,
    /// Resolver used for row keys in human-readable tables
    pub resolver: Option<&'a dyn CountryResolver>,
}

impl<'a> TableOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render counts with `format` and key rows by country name.
    pub fn human_readable(mut self, format: NumberFormat) -> Self {
        self.human_readable = Some(format);
        self
    }

    pub fn resolver(mut self, resolver: &'a dyn CountryResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn is_human_readable(&self) -> bool {
        self.human_readable.is_some()
    }

    /// Row key for a (non-total) country row.
    ///
    /// Raw tables keep the code. Human-readable tables use the resolved name
    /// and fall back to the code when the resolver has none.
    pub(crate) fn row_key(&self, code: &str) -> String {
        if !self.is_human_readable() {
            return code.to_string();
        }
        match self.resolver.and_then(|r| r.resolve(code)) {
            Some(name) => name,
            None => {
                if self.resolver.is_some() {
                    warn!(code, "no display name for country code");
                }
                code.to_string()
            }
        }
    }
}
