//! Tabulation: turn collaborator results into report tables.
//!
//! This module handles the second stage of the pipeline. Each builder takes a
//! read-only result, validates it, and returns a fresh [`ReportTable`]:
//!
//! - **Exposure**: country rows x `MMI1..MMI10`, total row last
//! - **Loss**: country rows x one value column, total row last
//! - **Structure**: country rows x union of building types, no-data cells
//!
//! [`ReportTable`]: crate::output::ReportTable
//!
//! ## Example
//!
//! ```rust,ignore
//! use pagerlib::query::{exposure_table, TableOptions};
//!
//! let table = exposure_table(&exposure, &TableOptions::new());
//! assert_eq!(table.last_row().unwrap().key, "TotalExposure");
//! ```

pub mod exposure;
pub mod loss;
pub mod options;
pub mod structure;

pub use exposure::{exposure_table, exposure_table_from_raw, mmi_headers};
pub use loss::loss_table;
pub use options::{CountryNames, CountryResolver, TableOptions};
pub use structure::{building_types, structure_table};
