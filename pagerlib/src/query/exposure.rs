//! Exposure tables: per-country counts at each MMI level.

use tracing::debug;

use super::options::TableOptions;
use crate::data::{ExposureResult, RawExposure, MMI_LEVELS};
use crate::output::{CellValue, ReportTable, TableKind, TableRow};
use crate::Result;

/// `MMI1` .. `MMI10`.
pub fn mmi_headers() -> Vec<String> {
    (1..=MMI_LEVELS).map(|level| format!("MMI{level}")).collect()
}

fn count_cells(bins: &[u64; MMI_LEVELS]) -> Vec<CellValue> {
    bins.iter().map(|n| CellValue::Count(*n)).collect()
}

/// Build an exposure table.
///
/// Country rows come out in ascending country-code order (names, when
/// substituted, are applied after ordering) and the total row is kept last.
pub fn exposure_table(exposure: &ExposureResult, options: &TableOptions) -> ReportTable {
    let mut table = ReportTable::new(TableKind::Exposure(exposure.kind), mmi_headers());

    // BTreeMap iteration is already ascending by code.
    table.rows = exposure
        .countries
        .iter()
        .map(|(code, bins)| TableRow::new(options.row_key(code), count_cells(bins)))
        .collect();
    table.total = Some(TableRow::new(
        exposure.kind.total_key(),
        count_cells(&exposure.total),
    ));
    table.note = exposure
        .max_border_mmi
        .map(|mmi| format!("Maximum border MMI: {mmi:.1}"));

    if let Some(format) = &options.human_readable {
        table.humanize(format);
    }

    debug!(
        kind = ?exposure.kind,
        rows = table.rows.len(),
        human_readable = table.is_human_readable(),
        "built exposure table"
    );
    table
}

/// Validate a raw exposure mapping and build its table.
pub fn exposure_table_from_raw(raw: &RawExposure, options: &TableOptions) -> Result<ReportTable> {
    let exposure = ExposureResult::from_raw(raw)?;
    Ok(exposure_table(&exposure, options))
}
