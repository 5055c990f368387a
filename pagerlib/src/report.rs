//! End-to-end impact report for one event.
//!
//! Selects the population snapshot, calls each collaborator once, and pipes
//! every raw result through its table builder. Any failure ends the run; no
//! table is produced from a result that failed validation.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::config::ReferenceRegistry;
use crate::data::{ExposureKind, ExposureResult, LossKind, ReferenceEntry};
use crate::error::PagerError;
use crate::models::{EventInfo, ExposureModel, LossModel, ModelError, StructureFatalityModel};
use crate::output::{compact_line, ReportTable};
use crate::query::{exposure_table, loss_table, structure_table, TableOptions};
use crate::Result;

/// Which optional reports to produce. Population exposure is always built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub fatality: bool,
    pub economic: bool,
    pub semi_empirical: bool,
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fatality(mut self) -> Self {
        self.fatality = true;
        self
    }

    pub fn with_economic(mut self) -> Self {
        self.economic = true;
        self
    }

    pub fn with_semi_empirical(mut self) -> Self {
        self.semi_empirical = true;
        self
    }
}

/// The collaborators a report is computed with.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub exposure: &'a dyn ExposureModel,
    pub loss: &'a dyn LossModel,
    pub structure: &'a dyn StructureFatalityModel,
}

impl<'a> Collaborators<'a> {
    /// Use one value for all three models.
    pub fn from_model<M>(model: &'a M) -> Self
    where
        M: ExposureModel + LossModel + StructureFatalityModel,
    {
        Self {
            exposure: model,
            loss: model,
            structure: model,
        }
    }
}

/// Semi-empirical fatalities split by occupancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureReport {
    pub total: f64,
    pub residential: ReportTable,
    pub non_residential: ReportTable,
}

/// All tables for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactReport {
    pub event: EventInfo,
    /// Population snapshot the exposure was computed against
    pub population: ReferenceEntry,
    pub exposure: ReportTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatalities: Option<ReportTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economic_exposure: Option<ReportTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dollars: Option<ReportTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semi_empirical: Option<StructureReport>,
}

fn computation<'a>(
    stage: &'static str,
    grid: &'a Path,
) -> impl FnOnce(ModelError) -> PagerError + 'a {
    move |e| PagerError::Computation {
        stage,
        grid: grid.to_path_buf(),
        message: e.to_string(),
    }
}

fn validated_exposure(
    models: &Collaborators,
    grid: &Path,
    population: &ReferenceEntry,
    kind: ExposureKind,
) -> Result<ExposureResult> {
    let raw = models
        .exposure
        .calc_exposure(grid, population, kind)
        .map_err(computation("exposure", grid))?;
    let exposure = ExposureResult::from_raw(&raw)?;
    if exposure.kind != kind {
        return Err(PagerError::malformed(
            "exposure",
            format!(
                "requested {kind:?} exposure but result carries {}",
                exposure.kind.total_key()
            ),
        ));
    }
    Ok(exposure)
}

fn losses_for(
    models: &Collaborators,
    grid: &Path,
    exposure: &ExposureResult,
    kind: LossKind,
    options: &TableOptions,
) -> Result<ReportTable> {
    let raw = models
        .loss
        .get_losses(exposure, kind)
        .map_err(computation("losses", grid))?;
    loss_table(&raw, kind, options)
}

impl ImpactReport {
    /// Compute every requested table for `event` on `grid`.
    pub fn generate(
        registry: &ReferenceRegistry,
        event: &EventInfo,
        grid: &Path,
        models: Collaborators,
        report: ReportOptions,
        options: &TableOptions,
    ) -> Result<Self> {
        if !grid.exists() {
            return Err(PagerError::GridNotFound(grid.to_path_buf()));
        }
        registry.validate()?;
        let population = registry.select_population(event.year())?.clone();
        info!(event = %event.id, year = population.year, "computing exposure");

        let population_kind = LossKind::Fatality.exposure_kind();
        let exposure = validated_exposure(&models, grid, &population, population_kind)?;
        let exposure_tab = exposure_table(&exposure, options);

        let fatalities = if report.fatality {
            info!("computing empirical fatalities");
            Some(losses_for(&models, grid, &exposure, LossKind::Fatality, options)?)
        } else {
            None
        };

        let (economic_exposure, dollars) = if report.economic {
            info!("computing economic losses");
            let econ_kind = LossKind::Economic.exposure_kind();
            let econ = validated_exposure(&models, grid, &population, econ_kind)?;
            let dollars = losses_for(&models, grid, &econ, LossKind::Economic, options)?;
            (Some(exposure_table(&econ, options)), Some(dollars))
        } else {
            (None, None)
        };

        let semi_empirical = if report.semi_empirical {
            info!("computing semi-empirical fatalities");
            let losses = models
                .structure
                .get_structure_losses(grid)
                .map_err(computation("semi-empirical fatalities", grid))?;
            if !losses.total.is_finite() || losses.total < 0.0 {
                return Err(PagerError::malformed(
                    "structure fatality",
                    format!("invalid total {}", losses.total),
                ));
            }
            Some(StructureReport {
                total: losses.total,
                residential: structure_table(&losses.residential)?.with_title("Residential"),
                non_residential: structure_table(&losses.non_residential)?
                    .with_title("Non-residential"),
            })
        } else {
            None
        };

        Ok(Self {
            event: event.clone(),
            population,
            exposure: exposure_tab,
            fatalities,
            economic_exposure,
            dollars,
            semi_empirical,
        })
    }

    /// Tables with a total row, in display order.
    pub fn totaled_tables(&self) -> Vec<&ReportTable> {
        [
            Some(&self.exposure),
            self.fatalities.as_ref(),
            self.economic_exposure.as_ref(),
            self.dollars.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// `eventId,<totals...>` on one line.
    ///
    /// The semi-empirical total, when computed, is the last field.
    pub fn compact_line(&self) -> String {
        let mut line = compact_line(&self.event.id, self.totaled_tables());
        if let Some(semi) = &self.semi_empirical {
            line.push_str(&format!(",{:.0}", semi.total));
        }
        line
    }
}
