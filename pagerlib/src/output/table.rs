//! Report tables.
//!
//! `ReportTable` is the canonical result of every tabulation: a key column,
//! fixed value columns, data rows in final order and an optional total row
//! that is always rendered last. Renderers iterate it without reordering.

use std::fmt;

use serde::{Serialize, Serializer};

use super::format::NumberFormat;
use crate::data::{ExposureKind, LossKind};

/// Display marker for a cell the model never evaluated.
pub const NO_DATA: &str = "n/a";

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Integer count (people, dollars, fatalities)
    Count(u64),
    /// Model estimate that may be fractional
    Number(f64),
    /// Pre-formatted text (human-readable counts)
    Text(String),
    /// Not evaluated for this row; distinct from zero
    NoData,
}

impl CellValue {
    pub fn is_no_data(&self) -> bool {
        matches!(self, CellValue::NoData)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, CellValue::Text(_))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CellValue::Count(v) => v.to_string(),
            CellValue::Number(v) => format!("{:.0}", v),
            CellValue::Text(s) => s.clone(),
            CellValue::NoData => NO_DATA.to_string(),
        };
        f.pad(&s)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Count(v) => serializer.serialize_u64(*v),
            CellValue::Number(v) => serializer.serialize_f64(*v),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::NoData => serializer.serialize_none(),
        }
    }
}

/// Which tabulation produced a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "table", content = "kind", rename_all = "snake_case")]
pub enum TableKind {
    Exposure(ExposureKind),
    Loss(LossKind),
    Structure,
}

impl TableKind {
    /// Heading shown above the table.
    pub fn title(&self) -> &'static str {
        match self {
            TableKind::Exposure(ExposureKind::Population) => "Population Exposure",
            TableKind::Exposure(ExposureKind::Economic) => "Economic Exposure",
            TableKind::Loss(LossKind::Fatality) => "Fatalities",
            TableKind::Loss(LossKind::Economic) => "Economic Losses",
            TableKind::Structure => "Fatalities by Building Type",
        }
    }
}

/// A single row (data row or total).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Country code, country name or total sentinel
    pub key: String,
    /// One cell per value column
    pub values: Vec<CellValue>,
}

impl TableRow {
    pub fn new(key: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }
}

/// A finished report table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub kind: TableKind,
    /// Optional heading override (e.g. "Residential")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Header of the key column
    pub key_header: String,
    /// Value column headers
    pub headers: Vec<String>,
    /// Data rows in display order
    pub rows: Vec<TableRow>,
    /// Total row, rendered after all data rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<TableRow>,
    /// Free-text note rendered under the table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    human_readable: bool,
}

impl ReportTable {
    pub fn new(kind: TableKind, headers: Vec<String>) -> Self {
        Self {
            kind,
            title: None,
            key_header: "Country".to_string(),
            headers,
            rows: Vec::new(),
            total: None,
            note: None,
            human_readable: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Heading to display: the override if set, otherwise the kind's title.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_else(|| self.kind.title())
    }

    /// Data rows followed by the total row.
    pub fn all_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().chain(self.total.iter())
    }

    /// The last displayed row, which is the total row when there is one.
    pub fn last_row(&self) -> Option<&TableRow> {
        self.all_rows().last()
    }

    /// Row by key.
    pub fn row(&self, key: &str) -> Option<&TableRow> {
        self.all_rows().find(|row| row.key == key)
    }

    pub fn is_human_readable(&self) -> bool {
        self.human_readable
    }

    /// Render every count cell with grouped digits.
    ///
    /// Applies to all rows at once, so a table is either fully raw or fully
    /// formatted. Estimates and no-data cells are left alone.
    pub fn humanize(&mut self, format: &NumberFormat) {
        if self.human_readable {
            return;
        }
        let rows = self.rows.iter_mut().chain(self.total.iter_mut());
        for cell in rows.flat_map(|row| row.values.iter_mut()) {
            if let CellValue::Count(n) = cell {
                *cell = CellValue::Text(format.format(*n));
            }
        }
        self.human_readable = true;
    }

    /// Total row values as plain strings, in column order.
    pub fn total_values(&self) -> Vec<String> {
        self.total
            .iter()
            .flat_map(|row| row.values.iter().map(|v| v.to_string()))
            .collect()
    }
}

/// One comma-separated line: the event id followed by the total row values of
/// each table in order.
pub fn compact_line<'a>(
    event_id: &str,
    tables: impl IntoIterator<Item = &'a ReportTable>,
) -> String {
    let mut fields = vec![event_id.to_string()];
    for table in tables {
        fields.extend(table.total_values());
    }
    fields.join(",")
}
