//! # pagerlib
//!
//! Earthquake impact tabulation: per-country population exposure, empirical
//! fatality and economic loss, and semi-empirical structural fatality tables.
//!
//! ## Overview
//!
//! The numerical models (intensity exposure, loss regressions, building
//! inventory estimates) are external collaborators reached through the traits
//! in [`models`]. This library handles what surrounds them:
//!
//! - **Reference selection**: pick the population snapshot nearest the event year
//! - **Validation**: reject collaborator output that breaks its contract
//! - **Tabulation**: canonical, deterministically ordered tables with the total
//!   row last
//! - **Formatting**: thousands grouping from an explicit [`NumberFormat`]
//!
//! The pipeline is:
//! 1. Data (reference datasets, raw collaborator results)
//! 2. Query (validated, ordered report tables)
//! 3. Output (raw or human-readable cells)
//!
//! ## Example
//!
//! ```rust
//! use pagerlib::{exposure_table_from_raw, ExposureEntry, RawExposure, TableOptions};
//!
//! let mut raw = RawExposure::new();
//! let bins = vec![0., 0., 0., 0., 5., 0., 0., 0., 0., 0.];
//! raw.insert("US".into(), ExposureEntry::Bins(bins.clone()));
//! raw.insert("TotalExposure".into(), ExposureEntry::Bins(bins));
//!
//! let table = exposure_table_from_raw(&raw, &TableOptions::new()).unwrap();
//! assert_eq!(table.headers[4], "MMI5");
//! assert_eq!(table.last_row().unwrap().key, "TotalExposure");
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod output;
pub mod query;
pub mod report;

pub use config::{FormatConfig, ReferenceRegistry};
pub use data::{
    select_reference, BuildingBreakdown, ExposureEntry, ExposureKind, ExposureResult, LossKind,
    RawExposure, RawLosses, ReferenceEntry, StructureFatalityResult, StructureLosses,
};
pub use error::{ErrorKind, PagerError};
pub use models::{
    EventInfo, ExposureModel, LossModel, ModelError, ModelOutput, ModelResult,
    StructureFatalityModel,
};
pub use output::{compact_line, CellValue, NumberFormat, ReportTable, TableKind, TableRow};
pub use query::{
    exposure_table, exposure_table_from_raw, loss_table, structure_table, CountryNames,
    CountryResolver, TableOptions,
};
pub use report::{Collaborators, ImpactReport, ReportOptions, StructureReport};

/// Result type for pagerlib operations
pub type Result<T> = std::result::Result<T, PagerError>;
