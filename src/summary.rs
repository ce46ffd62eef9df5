//! Summary statistics and per-column descriptions.

use crate::constants::{DATETIME_COLUMN, TIME_COLUMN};
use crate::models::{ColumnInfo, ColumnType, DateRange, MissingData, SummaryStats};
use crate::table::{Cell, Column, Table};
use std::collections::HashSet;

/// Compute aggregate statistics over a formatted table
pub fn summarize(table: &Table) -> SummaryStats {
    let total_rows = table.row_count();

    let date_range = table
        .column(DATETIME_COLUMN)
        .and_then(|column| Some((column.cells.first()?, column.cells.last()?)))
        .map(|(first, last)| DateRange {
            start: first.to_string(),
            end: last.to_string(),
        });

    let missing_data = table
        .columns()
        .iter()
        .filter_map(|column| {
            let count = column.missing_count();
            (count > 0).then(|| MissingData {
                column: column.name.clone(),
                count,
                percentage: percentage(count, total_rows),
            })
        })
        .collect();

    let numeric_columns = table
        .columns()
        .iter()
        .filter(|c| c.name != TIME_COLUMN && c.name != DATETIME_COLUMN)
        .filter(|c| c.is_numeric())
        .map(|c| c.name.clone())
        .collect();

    SummaryStats {
        total_rows,
        total_columns: table.column_count(),
        date_range,
        missing_data,
        numeric_columns,
    }
}

/// Describe every column, in table order
pub fn column_info(table: &Table) -> Vec<ColumnInfo> {
    table.columns().iter().map(describe_column).collect()
}

fn describe_column(column: &Column) -> ColumnInfo {
    let missing_count = column.missing_count();
    let non_missing_count = column.len() - missing_count;
    let unique_count = distinct_count(column);

    let numbers: Option<Vec<f64>> = column
        .numeric_values()
        .map(|values| values.into_iter().flatten().collect());

    match numbers {
        Some(numbers) if !numbers.is_empty() => {
            let column_type = if numbers.iter().all(|v| v.fract() == 0.0) {
                ColumnType::Integer
            } else {
                ColumnType::Float
            };
            let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
            let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
            ColumnInfo {
                name: column.name.clone(),
                column_type,
                non_missing_count,
                missing_count,
                unique_count,
                min: Some(min),
                max: Some(max),
                mean: Some(mean),
            }
        }
        numbers => ColumnInfo {
            name: column.name.clone(),
            column_type: if numbers.is_some() {
                ColumnType::Empty
            } else {
                ColumnType::Text
            },
            non_missing_count,
            missing_count,
            unique_count,
            min: None,
            max: None,
            mean: None,
        },
    }
}

#[derive(PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Number(u64),
    Text(&'a str),
}

fn distinct_count(column: &Column) -> usize {
    column
        .cells
        .iter()
        .filter_map(|cell| match cell {
            Cell::Number(value) => Some(CellKey::Number(value.to_bits())),
            Cell::Text(text) => Some(CellKey::Text(text)),
            Cell::Missing => None,
        })
        .collect::<HashSet<_>>()
        .len()
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
