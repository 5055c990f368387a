//! Plain-text rendering of impact reports

use console::{measure_text_width, pad_str, truncate_str, Alignment, Style};
use pagerlib::{EventInfo, ImpactReport, ReferenceEntry, ReportTable, TableRow};

/// Widest key column before names are truncated
const MAX_NAME_WIDTH: usize = 32;

/// Truncate a name to fit within max_width display columns, adding ".." suffix if needed
fn truncate_name(name: &str, max_width: usize) -> String {
    truncate_str(name, max_width, "..").into_owned()
}

fn left(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Left, None).into_owned()
}

fn right(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Right, None).into_owned()
}

/// Column widths: key column first, then one per value column
fn column_widths(table: &ReportTable) -> (usize, Vec<usize>) {
    let name_width = table
        .all_rows()
        .map(|row| measure_text_width(&row.key))
        .chain(std::iter::once(measure_text_width(&table.key_header)))
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH);

    let cell_widths = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            table
                .all_rows()
                .filter_map(|row| row.values.get(i))
                .map(|cell| measure_text_width(&cell.to_string()))
                .chain(std::iter::once(measure_text_width(header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    (name_width, cell_widths)
}

fn format_row(row: &TableRow, name_width: usize, cell_widths: &[usize]) -> String {
    let mut line = left(&truncate_name(&row.key, name_width), name_width);
    for (cell, width) in row.values.iter().zip(cell_widths) {
        line.push_str("  ");
        line.push_str(&right(&cell.to_string(), *width));
    }
    line
}

/// Render a single table with a heading, header row, rows and total
pub fn render_table(table: &ReportTable) -> String {
    let bold = Style::new().bold();
    let (name_width, cell_widths) = column_widths(table);

    let mut header = left(&table.key_header, name_width);
    for (name, width) in table.headers.iter().zip(&cell_widths) {
        header.push_str("  ");
        header.push_str(&right(name, *width));
    }
    let separator = "-".repeat(name_width + cell_widths.iter().map(|w| w + 2).sum::<usize>());

    let mut out = String::new();
    out.push_str(&format!("{}\n", bold.apply_to(table.display_title())));
    out.push_str(&format!("{}\n", bold.apply_to(header)));
    out.push_str(&separator);
    out.push('\n');
    for row in &table.rows {
        out.push_str(&format_row(row, name_width, &cell_widths));
        out.push('\n');
    }
    if let Some(total) = &table.total {
        out.push_str(&separator);
        out.push('\n');
        out.push_str(&format_row(total, name_width, &cell_widths));
        out.push('\n');
    }
    if let Some(note) = &table.note {
        out.push_str(note);
        out.push('\n');
    }
    out
}

fn render_event_banner(event: &EventInfo, population: &ReferenceEntry) -> String {
    let mut out = format!("Event: {}\n", event.id);
    out.push_str(&format!(
        "Origin time: {}\n",
        event.time.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(magnitude) = event.magnitude {
        out.push_str(&format!("Magnitude: {magnitude:.1}\n"));
    }
    if let Some(location) = &event.location {
        out.push_str(&format!("Location: {location}\n"));
    }
    out.push_str(&format!(
        "Population data: {} ({})\n",
        population.path.display(),
        population.year
    ));
    out
}

/// Render every table of a report, optionally preceded by the event banner
pub fn render_report(report: &ImpactReport, show_event: bool) -> String {
    let mut sections = Vec::new();
    if show_event {
        sections.push(render_event_banner(&report.event, &report.population));
    }
    sections.push(render_table(&report.exposure));
    sections.extend(report.fatalities.iter().map(render_table));
    sections.extend(report.economic_exposure.iter().map(render_table));
    sections.extend(report.dollars.iter().map(render_table));
    if let Some(semi) = &report.semi_empirical {
        sections.push(format!("Semi-empirical fatalities: {:.0}\n", semi.total));
        sections.push(render_table(&semi.residential));
        sections.push(render_table(&semi.non_residential));
    }
    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagerlib::{CellValue, LossKind, TableKind};

    fn sample_table() -> ReportTable {
        let mut table = ReportTable::new(
            TableKind::Loss(LossKind::Fatality),
            vec!["Fatalities".into()],
        );
        table.rows.push(TableRow::new("MX", vec![CellValue::Count(1200)]));
        table.rows.push(TableRow::new("US", vec![CellValue::Count(3)]));
        table.total = Some(TableRow::new("TotalFatalities", vec![CellValue::Count(1203)]));
        table
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Chile", 10), "Chile");
        assert_eq!(
            truncate_name("Democratic Republic of the Congo", 12),
            "Democratic.."
        );
    }

    #[test]
    fn test_render_table_layout() {
        console::set_colors_enabled(false);
        let output = render_table(&sample_table());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Fatalities");
        assert!(lines[1].starts_with("Country"));
        assert!(lines[1].ends_with("Fatalities"));
        assert!(lines[3].starts_with("MX"));
        assert!(lines[3].ends_with("1200"));
        assert_eq!(lines.last().unwrap(), &"TotalFatalities        1203");
    }

    #[test]
    fn test_wide_names_keep_columns_aligned() {
        console::set_colors_enabled(false);
        let mut table = ReportTable::new(
            TableKind::Loss(LossKind::Fatality),
            vec!["Fatalities".into()],
        );
        table.rows.push(TableRow::new("日本", vec![CellValue::Count(7)]));
        table.rows.push(TableRow::new("中华人民共和国", vec![CellValue::Count(12)]));
        table.rows.push(TableRow::new("US", vec![CellValue::Count(3)]));
        table.total = Some(TableRow::new("TotalFatalities", vec![CellValue::Count(22)]));

        let output = render_table(&table);
        let widths: Vec<usize> = output.lines().skip(1).map(measure_text_width).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{output}");
        assert!(output.contains("中华人民共和国"));
    }

    #[test]
    fn test_truncate_wide_name() {
        assert_eq!(measure_text_width(&truncate_name("中华人民共和国", 10)), 10);
    }

    #[test]
    fn test_column_widths() {
        let (name_width, cells) = column_widths(&sample_table());
        assert_eq!(name_width, "TotalFatalities".len());
        assert_eq!(cells, vec!["Fatalities".len()]);
    }

    #[test]
    fn test_no_data_cells_render_marker() {
        console::set_colors_enabled(false);
        let mut table = ReportTable::new(TableKind::Structure, vec!["W1".into(), "URM".into()]);
        let row = TableRow::new("US", vec![CellValue::Number(2.0), CellValue::NoData]);
        table.rows.push(row);
        let output = render_table(&table);
        assert!(output.contains(pagerlib::output::NO_DATA));
    }
}
