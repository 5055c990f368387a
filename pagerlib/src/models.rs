//! Collaborator interfaces for the exposure, loss and semi-empirical models.
//!
//! The numerical models live outside this crate. They are reached through
//! these traits, and [`ModelOutput`] implements all of them from a JSON
//! document written by the model pipeline.

use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::data::{
    ExposureKind, ExposureResult, LossKind, RawExposure, RawLosses, ReferenceEntry,
    StructureLosses,
};
use crate::error::PagerError;
use crate::Result;

/// Error type collaborators may return.
pub type ModelError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for collaborator calls.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Population-weighted intensity exposure.
pub trait ExposureModel {
    /// Per-country exposure on `grid` using the `population` snapshot.
    fn calc_exposure(
        &self,
        grid: &Path,
        population: &ReferenceEntry,
        kind: ExposureKind,
    ) -> ModelResult<RawExposure>;
}

/// Empirical fatality or economic loss regression.
pub trait LossModel {
    fn get_losses(&self, exposure: &ExposureResult, kind: LossKind) -> ModelResult<RawLosses>;
}

/// Building-inventory-based fatality estimate.
pub trait StructureFatalityModel {
    fn get_structure_losses(&self, grid: &Path) -> ModelResult<StructureLosses>;
}

/// Event metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    /// Event identifier, e.g. `us1234`
    pub id: String,
    /// Origin time
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
}

impl EventInfo {
    /// Year of the origin time; used to pick a population snapshot.
    pub fn year(&self) -> i32 {
        self.time.year()
    }
}

/// Serialized output of the model pipeline for one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub event: Option<EventInfo>,
    pub exposure: Option<RawExposure>,
    pub economic_exposure: Option<RawExposure>,
    pub fatalities: Option<RawLosses>,
    pub dollars: Option<RawLosses>,
    pub semi_empirical: Option<StructureLosses>,
}

fn missing(section: &str) -> ModelError {
    format!("model output has no '{section}' section").into()
}

impl ModelOutput {
    /// Read a model output document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PagerError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| PagerError::Computation {
            stage: "model output",
            grid: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl ExposureModel for ModelOutput {
    fn calc_exposure(
        &self,
        _grid: &Path,
        _population: &ReferenceEntry,
        kind: ExposureKind,
    ) -> ModelResult<RawExposure> {
        let section = match kind {
            ExposureKind::Population => ("exposure", &self.exposure),
            ExposureKind::Economic => ("economic_exposure", &self.economic_exposure),
        };
        section.1.clone().ok_or_else(|| missing(section.0))
    }
}

impl LossModel for ModelOutput {
    fn get_losses(&self, _exposure: &ExposureResult, kind: LossKind) -> ModelResult<RawLosses> {
        let section = match kind {
            LossKind::Fatality => ("fatalities", &self.fatalities),
            LossKind::Economic => ("dollars", &self.dollars),
        };
        section.1.clone().ok_or_else(|| missing(section.0))
    }
}

impl StructureFatalityModel for ModelOutput {
    fn get_structure_losses(&self, _grid: &Path) -> ModelResult<StructureLosses> {
        self.semi_empirical
            .clone()
            .ok_or_else(|| missing("semi_empirical"))
    }
}
