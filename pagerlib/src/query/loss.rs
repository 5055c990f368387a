//! Loss tables: one fatality or dollar value per country.

use tracing::debug;

use super::options::TableOptions;
use crate::data::results::to_count;
use crate::data::{LossKind, RawLosses};
use crate::error::PagerError;
use crate::output::{CellValue, ReportTable, TableKind, TableRow};
use crate::Result;

const TABLE: &str = "loss";

/// Build a loss table for `kind`.
///
/// `losses` must carry the total sentinel for `kind` and not the other kind's.
/// Country rows are ordered by code and the total row is appended last.
pub fn loss_table(
    losses: &RawLosses,
    kind: LossKind,
    options: &TableOptions,
) -> Result<ReportTable> {
    let other = kind.other().total_key();
    if losses.contains_key(other) {
        return Err(PagerError::malformed(
            TABLE,
            format!("{other} present in a {} result", kind.column_label()),
        ));
    }
    let total = match losses.get(kind.total_key()) {
        Some(value) => to_count(*value, TABLE, kind.total_key())?,
        None => {
            return Err(PagerError::malformed(
                TABLE,
                format!("missing {}", kind.total_key()),
            ))
        }
    };

    let mut rows = Vec::with_capacity(losses.len().saturating_sub(1));
    // BTreeMap iteration is already ascending by code.
    for (code, value) in losses.iter().filter(|(k, _)| *k != kind.total_key()) {
        let count = to_count(*value, TABLE, code)?;
        rows.push(TableRow::new(options.row_key(code), vec![CellValue::Count(count)]));
    }

    let mut table = ReportTable::new(
        TableKind::Loss(kind),
        vec![kind.column_label().to_string()],
    );
    table.rows = rows;
    table.total = Some(TableRow::new(kind.total_key(), vec![CellValue::Count(total)]));

    if let Some(format) = &options.human_readable {
        table.humanize(format);
    }

    debug!(?kind, rows = table.rows.len(), "built loss table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::NumberFormat;
    use crate::query::options::CountryNames;

    fn losses(entries: &[(&str, f64)]) -> RawLosses {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_fatality_table() {
        let raw = losses(&[("US", 3.0), ("MX", 1200.0), ("TotalFatalities", 1203.0)]);
        let table = loss_table(&raw, LossKind::Fatality, &TableOptions::new()).unwrap();

        assert_eq!(table.headers, vec!["Fatalities"]);
        let keys: Vec<&str> = table.all_rows().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["MX", "US", "TotalFatalities"]);
        assert_eq!(table.total_values(), vec!["1203"]);
    }

    #[test]
    fn test_economic_table_total_after_late_code() {
        let raw = losses(&[("ZZ", 10.0), ("AA", 5.0), ("TotalDollars", 15.0)]);
        let table = loss_table(&raw, LossKind::Economic, &TableOptions::new()).unwrap();

        assert_eq!(table.headers, vec!["Dollars Lost"]);
        assert_eq!(table.rows.last().unwrap().key, "ZZ");
        assert_eq!(table.last_row().unwrap().key, "TotalDollars");
    }

    #[test]
    fn test_missing_total_rejected() {
        let raw = losses(&[("US", 3.0)]);
        let err = loss_table(&raw, LossKind::Fatality, &TableOptions::new()).unwrap_err();
        assert!(err.to_string().contains("missing TotalFatalities"));
    }

    #[test]
    fn test_wrong_kind_sentinel_rejected() {
        let raw = losses(&[("US", 3.0), ("TotalDollars", 3.0)]);
        assert!(loss_table(&raw, LossKind::Fatality, &TableOptions::new()).is_err());

        let raw = losses(&[("US", 3.0), ("TotalDollars", 3.0), ("TotalFatalities", 3.0)]);
        assert!(loss_table(&raw, LossKind::Economic, &TableOptions::new()).is_err());
    }

    #[test]
    fn test_negative_value_rejected() {
        let raw = losses(&[("US", -1.0), ("TotalFatalities", 0.0)]);
        let err = loss_table(&raw, LossKind::Fatality, &TableOptions::new()).unwrap_err();
        assert!(matches!(err, PagerError::MalformedResult { .. }));
    }

    #[test]
    fn test_total_too_large_for_a_count_rejected() {
        let raw = losses(&[("TotalDollars", 18_446_744_073_709_551_616.0)]);
        let err = loss_table(&raw, LossKind::Economic, &TableOptions::new()).unwrap_err();
        assert!(matches!(err, PagerError::MalformedResult { .. }));
    }

    #[test]
    fn test_human_readable() {
        let raw = losses(&[("US", 2500000.0), ("TotalDollars", 2500000.0)]);
        let names = CountryNames::new(
            [("US".to_string(), "United States".to_string())]
                .into_iter()
                .collect(),
        );
        let options = TableOptions::new()
            .human_readable(NumberFormat::default())
            .resolver(&names);
        let table = loss_table(&raw, LossKind::Economic, &options).unwrap();

        assert_eq!(table.rows[0].key, "United States");
        assert_eq!(table.rows[0].values[0].to_string(), "2,500,000");
        assert_eq!(table.last_row().unwrap().key, "TotalDollars");
        assert_eq!(table.total_values(), vec!["2,500,000"]);
    }

    #[test]
    fn test_total_only() {
        let raw = losses(&[("TotalFatalities", 0.0)]);
        let table = loss_table(&raw, LossKind::Fatality, &TableOptions::new()).unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(table.last_row().unwrap().key, "TotalFatalities");
    }
}
