//! Data inputs: reference datasets and collaborator results.
//!
//! This module handles the first stage of the pipeline:
//!
//! - **Reference selection**: pick the population snapshot nearest the event year
//! - **Results**: raw collaborator output shapes and their validation
//!
//! ## Example
//!
//! ```rust,ignore
//! use pagerlib::data::{select_reference, ExposureResult};
//!
//! let population = select_reference(&registry.population, 2018)?;
//! let exposure = ExposureResult::from_raw(&raw)?;
//! ```

pub mod reference;
pub mod results;

pub use reference::{select_reference, ReferenceEntry};
pub use results::{
    BuildingBreakdown, ExposureEntry, ExposureKind, ExposureResult, LossKind, RawExposure,
    RawLosses, StructureFatalityResult, StructureLosses, MAX_BORDER_MMI, MMI_LEVELS, TOTAL_DOLLARS,
    TOTAL_ECONOMIC_EXPOSURE, TOTAL_EXPOSURE, TOTAL_FATALITIES,
};
