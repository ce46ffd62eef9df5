//! Console rendering of tables and summaries.

use crate::classifier::Classification;
use crate::models::{ColumnInfo, SummaryStats};
use crate::table::{Cell, Table};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell as TableCell, CellAlignment, ContentArrangement, Table as TextTable};

/// Render the first `max_rows` rows of a table. Missing cells render blank.
pub fn render_table(table: &Table, max_rows: usize) -> String {
    let mut text = TextTable::new();
    text.load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(table.column_names());

    for row in table.head(max_rows).rows() {
        text.add_row(row.into_iter().map(render_cell).collect::<Vec<_>>());
    }

    text.to_string()
}

fn render_cell(cell: &Cell) -> TableCell {
    match cell {
        Cell::Number(value) => TableCell::new(value).set_alignment(CellAlignment::Right),
        Cell::Text(text) => TableCell::new(text),
        Cell::Missing => TableCell::new(""),
    }
}

/// Render a titled table view, noting truncation when rows were cut
pub fn render_data(title: &str, table: &Table, max_rows: usize) -> String {
    let mut output = vec![format!("=== {} ===", title), render_table(table, max_rows)];
    if table.row_count() > max_rows {
        output.push(format!(
            "\n... showing first {} of {} rows",
            max_rows,
            table.row_count()
        ));
    }
    output.join("\n")
}

/// Render summary statistics as plain text
pub fn render_summary(stats: &SummaryStats, categories: &Classification) -> String {
    let mut lines = vec![
        "=== TradingView CSV Parser Summary ===".to_string(),
        format!("Total rows: {}", stats.total_rows),
        format!("Total columns: {}", stats.total_columns),
    ];

    if let Some(range) = &stats.date_range {
        lines.push(format!("Date range: {} to {}", range.start, range.end));
    }

    if !stats.missing_data.is_empty() {
        lines.push("\nMissing data:".to_string());
        for missing in &stats.missing_data {
            lines.push(format!(
                "  {}: {} rows ({:.1}%)",
                missing.column, missing.count, missing.percentage
            ));
        }
    }

    lines.push(format!("\nNumeric columns: {}", stats.numeric_columns.len()));

    if !categories.is_empty() {
        lines.push(format!(
            "\nData categories found: {}",
            categories.labels().join(", ")
        ));
    }

    lines.join("\n")
}

/// Render column descriptions as a table
pub fn render_column_info(info: &[ColumnInfo]) -> String {
    let mut text = TextTable::new();
    text.load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(vec![
            "Column", "Type", "Non-missing", "Missing", "Unique", "Min", "Max", "Mean",
        ]);

    for column in info {
        let stat = |value: Option<f64>| {
            TableCell::new(value.map_or_else(String::new, |v| format!("{:.4}", v)))
                .set_alignment(CellAlignment::Right)
        };
        text.add_row(vec![
            TableCell::new(&column.name),
            TableCell::new(column.column_type),
            TableCell::new(column.non_missing_count).set_alignment(CellAlignment::Right),
            TableCell::new(column.missing_count).set_alignment(CellAlignment::Right),
            TableCell::new(column.unique_count).set_alignment(CellAlignment::Right),
            stat(column.min),
            stat(column.max),
            stat(column.mean),
        ]);
    }

    text.to_string()
}
