//! Reference dataset registry loaded from TOML.
//!
//! ```toml
//! country_grid = "/data/isogrid.bil"
//! urban_grid = "/data/urbanrural.bil"
//!
//! [[population]]
//! year = 2015
//! path = "/data/lspop2015.flt"
//!
//! [format]
//! thousands_separator = ","
//!
//! [country_names]
//! US = "United States"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::data::reference::{ensure_exists, select_reference, ReferenceEntry};
use crate::error::PagerError;
use crate::output::NumberFormat;
use crate::query::CountryNames;
use crate::Result;

/// Optional formatting overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Overrides the locale's grouping separator
    pub thousands_separator: Option<String>,
}

/// Reference datasets the models run against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRegistry {
    /// Population snapshots by vintage year
    #[serde(default)]
    pub population: Vec<ReferenceEntry>,
    /// Country code grid
    pub country_grid: PathBuf,
    /// Urban/rural grid
    pub urban_grid: PathBuf,
    #[serde(default)]
    pub format: FormatConfig,
    /// Display names keyed by country code
    #[serde(default)]
    pub country_names: BTreeMap<String, String>,
}

impl ReferenceRegistry {
    /// Parse a registry from TOML text. `origin` is only used in error messages.
    pub fn from_toml(content: &str, origin: impl AsRef<Path>) -> Result<Self> {
        toml::from_str(content).map_err(|e| PagerError::ConfigParse {
            path: origin.as_ref().to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load and validate a registry file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PagerError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_toml(&content, path)?;
        registry.validate()?;
        info!(
            path = %path.display(),
            population = registry.population.len(),
            "loaded reference registry"
        );
        Ok(registry)
    }

    /// Check that the registry is non-empty and every dataset exists.
    pub fn validate(&self) -> Result<()> {
        if self.population.is_empty() {
            return Err(PagerError::EmptyRegistry);
        }
        for entry in &self.population {
            ensure_exists(&entry.path)?;
        }
        ensure_exists(&self.country_grid)?;
        ensure_exists(&self.urban_grid)?;
        debug!("all reference datasets present");
        Ok(())
    }

    /// Population dataset nearest to `event_year`.
    pub fn select_population(&self, event_year: i32) -> Result<&ReferenceEntry> {
        select_reference(&self.population, event_year)
    }

    /// Grouping to use for human-readable output.
    ///
    /// An explicit separator in the file wins over the locale.
    pub fn number_format(&self, locale: NumberFormat) -> NumberFormat {
        match &self.format.thousands_separator {
            Some(separator) => NumberFormat::with_separator(separator.clone()),
            None => locale,
        }
    }

    pub fn country_names(&self) -> CountryNames {
        CountryNames::new(self.country_names.clone())
    }
}
