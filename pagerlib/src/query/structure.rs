//! Structure fatality tables: per-country fatalities by building type.

use indexmap::IndexSet;
use tracing::debug;

use crate::data::StructureFatalityResult;
use crate::error::PagerError;
use crate::output::{CellValue, ReportTable, TableKind, TableRow};
use crate::Result;

/// Union of building types across countries, in first-seen order.
pub fn building_types(by_country: &StructureFatalityResult) -> Vec<String> {
    let columns: IndexSet<&String> = by_country
        .values()
        .flat_map(|breakdown| breakdown.keys())
        .collect();
    columns.into_iter().cloned().collect()
}

/// Build a dense building-type table.
///
/// Rows follow the input order. A building type a country's breakdown does not
/// mention is [`CellValue::NoData`], never zero.
pub fn structure_table(by_country: &StructureFatalityResult) -> Result<ReportTable> {
    let columns = building_types(by_country);

    let mut rows = Vec::with_capacity(by_country.len());
    for (code, breakdown) in by_country {
        let mut values = Vec::with_capacity(columns.len());
        for column in &columns {
            let cell = match breakdown.get(column) {
                Some(value) if value.is_finite() && *value >= 0.0 => CellValue::Number(*value),
                Some(value) => {
                    return Err(PagerError::malformed(
                        "structure fatality",
                        format!("invalid fatality count {value} for '{code}'/'{column}'"),
                    ))
                }
                None => CellValue::NoData,
            };
            values.push(cell);
        }
        rows.push(TableRow::new(code, values));
    }

    debug!(
        rows = rows.len(),
        columns = columns.len(),
        "built structure fatality table"
    );

    let mut table = ReportTable::new(TableKind::Structure, columns);
    table.rows = rows;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BuildingBreakdown;

    fn breakdown(entries: &[(&str, f64)]) -> BuildingBreakdown {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_union_of_columns_with_no_data() {
        let mut input = StructureFatalityResult::new();
        input.insert("A".into(), breakdown(&[("W1", 1.0), ("S1", 2.0)]));
        input.insert("B".into(), breakdown(&[("W1", 0.0), ("URM", 4.0)]));

        let table = structure_table(&input).unwrap();
        assert_eq!(table.headers, vec!["W1", "S1", "URM"]);

        let a = table.row("A").unwrap();
        let b = table.row("B").unwrap();
        assert!(a.values[2].is_no_data());
        assert!(b.values[1].is_no_data());
        // Zero is a computed value, not missing data.
        assert_eq!(b.values[0], CellValue::Number(0.0));
        assert!(table.total.is_none());
    }

    #[test]
    fn test_rows_follow_input_order() {
        let mut input = StructureFatalityResult::new();
        input.insert("US".into(), breakdown(&[("W1", 1.0)]));
        input.insert("CA".into(), breakdown(&[("W1", 1.0)]));
        input.insert("MX".into(), breakdown(&[("W1", 1.0)]));

        let table = structure_table(&input).unwrap();
        let keys: Vec<&str> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["US", "CA", "MX"]);
    }

    #[test]
    fn test_column_order_first_seen() {
        let mut input = StructureFatalityResult::new();
        input.insert("A".into(), breakdown(&[("C1", 1.0)]));
        input.insert("B".into(), breakdown(&[("URM", 1.0), ("C1", 2.0), ("A", 3.0)]));

        assert_eq!(building_types(&input), vec!["C1", "URM", "A"]);
    }

    #[test]
    fn test_negative_rejected() {
        let mut input = StructureFatalityResult::new();
        input.insert("A".into(), breakdown(&[("W1", -2.0)]));
        assert!(structure_table(&input).is_err());
    }

    #[test]
    fn test_empty_input() {
        let table = structure_table(&StructureFatalityResult::new()).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_from_json_document_order() {
        let input: StructureFatalityResult =
            serde_json::from_str(r#"{"PE": {"UFB": 10.5, "W1": 2}, "CL": {"W1": 0, "C3": 1}}"#)
                .unwrap();
        let table = structure_table(&input).unwrap();
        assert_eq!(table.headers, vec!["UFB", "W1", "C3"]);
        assert_eq!(table.rows[0].key, "PE");
        assert!(table.rows[1].values[0].is_no_data());
    }
}
