//! Collaborator output contracts.
//!
//! Exposure, loss and semi-empirical models hand back loosely typed
//! per-country mappings. This module holds the raw shapes they are
//! deserialized into and the validation that turns raw exposure into a typed
//! [`ExposureResult`].

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::PagerError;
use crate::Result;

/// Number of MMI bins in an exposure array (MMI 1..10).
pub const MMI_LEVELS: usize = 10;

pub const TOTAL_EXPOSURE: &str = "TotalExposure";
pub const TOTAL_ECONOMIC_EXPOSURE: &str = "TotalEconomicExposure";
pub const MAX_BORDER_MMI: &str = "maximum_border_mmi";
pub const TOTAL_FATALITIES: &str = "TotalFatalities";
pub const TOTAL_DOLLARS: &str = "TotalDollars";

/// One value in a raw exposure mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExposureEntry {
    /// Per-MMI counts
    Bins(Vec<f64>),
    /// Scalar metadata (`maximum_border_mmi`)
    Scalar(f64),
}

impl From<Vec<f64>> for ExposureEntry {
    fn from(bins: Vec<f64>) -> Self {
        ExposureEntry::Bins(bins)
    }
}

/// Raw exposure mapping as produced by the exposure model.
pub type RawExposure = BTreeMap<String, ExposureEntry>;

/// Raw loss mapping as produced by an empirical loss model.
pub type RawLosses = BTreeMap<String, f64>;

/// Building type to fatalities for one country, in collaborator order.
pub type BuildingBreakdown = IndexMap<String, f64>;

/// Country code to building breakdown, in collaborator order.
pub type StructureFatalityResult = IndexMap<String, BuildingBreakdown>;

/// Output of the semi-empirical model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureLosses {
    /// Total fatalities across all countries and building types
    pub total: f64,
    /// Residential breakdown
    pub residential: StructureFatalityResult,
    /// Non-residential breakdown
    pub non_residential: StructureFatalityResult,
}

/// What an exposure result counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureKind {
    /// People exposed per MMI level
    Population,
    /// Economic value exposed per MMI level
    Economic,
}

impl ExposureKind {
    /// Sentinel key the model uses for this kind's total row.
    pub fn total_key(&self) -> &'static str {
        match self {
            ExposureKind::Population => TOTAL_EXPOSURE,
            ExposureKind::Economic => TOTAL_ECONOMIC_EXPOSURE,
        }
    }
}

/// What a loss result counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    Fatality,
    Economic,
}

impl LossKind {
    /// Sentinel key the model uses for this kind's total row.
    pub fn total_key(&self) -> &'static str {
        match self {
            LossKind::Fatality => TOTAL_FATALITIES,
            LossKind::Economic => TOTAL_DOLLARS,
        }
    }

    /// Value column header.
    pub fn column_label(&self) -> &'static str {
        match self {
            LossKind::Fatality => "Fatalities",
            LossKind::Economic => "Dollars Lost",
        }
    }

    pub fn other(&self) -> LossKind {
        match self {
            LossKind::Fatality => LossKind::Economic,
            LossKind::Economic => LossKind::Fatality,
        }
    }

    /// Exposure kind the matching loss model consumes.
    pub fn exposure_kind(&self) -> ExposureKind {
        match self {
            LossKind::Fatality => ExposureKind::Population,
            LossKind::Economic => ExposureKind::Economic,
        }
    }
}

/// Convert a collaborator number into a count.
pub(crate) fn to_count(value: f64, table: &'static str, key: &str) -> Result<u64> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= u64::MAX as f64 {
        return Err(PagerError::malformed(
            table,
            format!("value {value} for '{key}' is not a non-negative integer"),
        ));
    }
    Ok(value as u64)
}

fn to_bins(values: &[f64], key: &str) -> Result<[u64; MMI_LEVELS]> {
    if values.len() != MMI_LEVELS {
        return Err(PagerError::malformed(
            "exposure",
            format!(
                "'{key}' has {} intensity bins, expected {MMI_LEVELS}",
                values.len()
            ),
        ));
    }
    let mut bins = [0u64; MMI_LEVELS];
    for (slot, value) in bins.iter_mut().zip(values) {
        *slot = to_count(*value, "exposure", key)?;
    }
    Ok(bins)
}

/// Validated exposure: per-country MMI counts plus a total row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureResult {
    /// Population or economic exposure
    pub kind: ExposureKind,
    /// Per-country bins keyed by country code
    pub countries: BTreeMap<String, [u64; MMI_LEVELS]>,
    /// Bins of the total row
    pub total: [u64; MMI_LEVELS],
    /// Highest MMI seen along a country border, when the model reports it
    pub max_border_mmi: Option<f64>,
}

impl ExposureResult {
    pub fn new(
        kind: ExposureKind,
        countries: BTreeMap<String, [u64; MMI_LEVELS]>,
        total: [u64; MMI_LEVELS],
    ) -> Self {
        Self {
            kind,
            countries,
            total,
            max_border_mmi: None,
        }
    }

    /// Validate a raw exposure mapping.
    ///
    /// The kind is taken from whichever total sentinel is present; exactly one
    /// must be. `maximum_border_mmi` is split off as metadata.
    pub fn from_raw(raw: &RawExposure) -> Result<Self> {
        let kind = match (
            raw.contains_key(TOTAL_EXPOSURE),
            raw.contains_key(TOTAL_ECONOMIC_EXPOSURE),
        ) {
            (true, false) => ExposureKind::Population,
            (false, true) => ExposureKind::Economic,
            (true, true) => {
                return Err(PagerError::malformed(
                    "exposure",
                    format!("both {TOTAL_EXPOSURE} and {TOTAL_ECONOMIC_EXPOSURE} present"),
                ))
            }
            (false, false) => {
                return Err(PagerError::malformed(
                    "exposure",
                    format!("neither {TOTAL_EXPOSURE} nor {TOTAL_ECONOMIC_EXPOSURE} present"),
                ))
            }
        };

        let mut countries = BTreeMap::new();
        let mut total = [0u64; MMI_LEVELS];
        let mut max_border_mmi = None;

        for (key, entry) in raw {
            if key == MAX_BORDER_MMI {
                if let ExposureEntry::Scalar(mmi) = entry {
                    max_border_mmi = Some(*mmi);
                }
                continue;
            }
            let values = match entry {
                ExposureEntry::Bins(values) => values,
                ExposureEntry::Scalar(_) => {
                    return Err(PagerError::malformed(
                        "exposure",
                        format!("'{key}' is a scalar, expected {MMI_LEVELS} intensity bins"),
                    ))
                }
            };
            let bins = to_bins(values, key)?;
            if key == kind.total_key() {
                total = bins;
            } else {
                countries.insert(key.clone(), bins);
            }
        }

        Ok(Self {
            kind,
            countries,
            total,
            max_border_mmi,
        })
    }
}
