//! Output: report tables and number formatting.
//!
//! This module handles the final stage of the pipeline:
//!
//! - **ReportTable**: key column, value headers, data rows and a trailing total
//! - **NumberFormat**: thousands grouping for human-readable counts
//!
//! ## Example
//!
//! ```rust
//! use pagerlib::output::NumberFormat;
//!
//! assert_eq!(NumberFormat::default().format(1234567), "1,234,567");
//! ```

pub mod format;
pub mod table;

pub use format::NumberFormat;
pub use table::{compact_line, CellValue, ReportTable, TableKind, TableRow, NO_DATA};
