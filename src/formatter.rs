//! Table formatting: derived date-time column and numeric rounding.

use crate::constants::{DATETIME_COLUMN, DEFAULT_DECIMAL_PLACES, TIME_COLUMN};
use crate::datetime::to_datetime_column;
use crate::table::{Cell, Column, Table};
use chrono::Utc;
use tracing::debug;

/// Formats raw tables with a fixed rounding precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormatter {
    decimal_places: u32,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMAL_PLACES)
    }
}

impl TableFormatter {
    pub fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Produce the formatted tier from a raw table.
    ///
    /// When a `time` column exists a `datetime` column is derived from it and
    /// placed first, replacing any `datetime` column already present. A
    /// numeric `time` column is coerced without rounding and `datetime` is
    /// kept as-is. Every other column goes through
    /// [`format_column`](Self::format_column).
    pub fn format(&self, raw: &Table) -> Table {
        let mut columns = Vec::with_capacity(raw.column_count() + 1);

        let synthesized = match raw.column(TIME_COLUMN) {
            Some(time) => {
                let values = to_datetime_column(&time.cells, &Utc);
                columns.push(Column::new(
                    DATETIME_COLUMN,
                    values.into_iter().map(Cell::Text).collect(),
                ));
                true
            }
            None => false,
        };

        for column in raw.columns() {
            match column.name.as_str() {
                DATETIME_COLUMN if synthesized => {
                    debug!("Replacing existing {} column", DATETIME_COLUMN);
                }
                TIME_COLUMN => columns.push(
                    coerce_column(column, |value| value).unwrap_or_else(|| column.clone()),
                ),
                DATETIME_COLUMN => columns.push(column.clone()),
                _ => columns.push(self.format_column(column)),
            }
        }

        debug!(
            "Formatted {} rows x {} columns (datetime derived: {})",
            raw.row_count(),
            columns.len(),
            synthesized
        );
        Table::from_aligned(columns, raw.row_count())
    }

    /// Round a column when it is numeric as a whole; otherwise return it as-is.
    ///
    /// Missing cells stay missing. A column with any non-numeric text is never
    /// partially converted.
    pub fn format_column(&self, column: &Column) -> Column {
        match coerce_column(column, |value| self.round(value)) {
            Some(formatted) => formatted,
            None => {
                debug!("Column '{}' is not numeric, passing through", column.name);
                column.clone()
            }
        }
    }

    pub fn round(&self, value: f64) -> f64 {
        round_to(value, self.decimal_places)
    }
}

/// Convert a fully numeric column to number cells, mapping each value
fn coerce_column(column: &Column, convert: impl Fn(f64) -> f64) -> Option<Column> {
    let values = column.numeric_values()?;
    Some(Column::new(
        column.name.clone(),
        values
            .into_iter()
            .map(|value| value.map_or(Cell::Missing, |v| Cell::Number(convert(v))))
            .collect(),
    ))
}

/// Round half away from zero to `decimal_places`.
///
/// Values too large to scale are returned unchanged; negative zero
/// normalizes to zero.
pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_table() -> Table {
        Table::from_columns(vec![
            Column::new("time", vec![Cell::Number(0.0), Cell::Number(86_400.0)]),
            Column::new("open", vec![Cell::Number(3.14159265), Cell::Missing]),
            Column::new("label", vec![Cell::Text("a".into()), Cell::Text("b".into())]),
        ])
        .unwrap()
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159265, 4), 3.1416);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-0.00001, 4), 0.0);
        assert!(round_to(-0.00001, 4).is_sign_positive());
        assert_eq!(round_to(1e305, 4), 1e305);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let once = round_to(102.123456, 4);
        assert_eq!(round_to(once, 4), once);
    }

    #[test]
    fn test_datetime_column_is_first() {
        let formatted = TableFormatter::default().format(&raw_table());
        assert_eq!(
            formatted.column_names(),
            vec!["datetime", "time", "open", "label"]
        );
        let datetime = formatted.column("datetime").unwrap();
        assert_eq!(
            datetime.cells,
            vec![
                Cell::Text("1970-01-01 00:00:00".into()),
                Cell::Text("1970-01-02 00:00:00".into())
            ]
        );
    }

    #[test]
    fn test_numeric_rounding_keeps_missing() {
        let formatted = TableFormatter::new(4).format(&raw_table());
        assert_eq!(
            formatted.column("open").unwrap().cells,
            vec![Cell::Number(3.1416), Cell::Missing]
        );
    }

    #[test]
    fn test_time_column_is_left_alone() {
        let raw = Table::from_columns(vec![Column::new(
            "time",
            vec![Cell::Number(1_754_179_200.123456)],
        )])
        .unwrap();
        let formatted = TableFormatter::new(2).format(&raw);
        assert_eq!(
            formatted.column("time").unwrap().cells,
            vec![Cell::Number(1_754_179_200.123456)]
        );
    }

    #[test]
    fn test_time_text_is_coerced_without_rounding() {
        let raw = Table::from_columns(vec![Column::new(
            "time",
            vec![Cell::from_raw("1754179200.5"), Cell::from_raw("NaN")],
        )])
        .unwrap();
        let formatted = TableFormatter::new(0).format(&raw);
        assert_eq!(
            formatted.column("time").unwrap().cells,
            vec![Cell::Number(1_754_179_200.5), Cell::Missing]
        );
    }

    #[test]
    fn test_non_numeric_time_passes_through() {
        let raw = Table::from_columns(vec![Column::new(
            "time",
            vec![Cell::from_raw("0"), Cell::from_raw("later")],
        )])
        .unwrap();
        let formatted = TableFormatter::default().format(&raw);
        assert_eq!(
            formatted.column("time").unwrap().cells,
            vec![Cell::Text("0".into()), Cell::Text("later".into())]
        );
    }

    #[test]
    fn test_mixed_raw_fields_keep_source_text() {
        let column = Column::new(
            "code",
            ["007", "1.0", "x"].into_iter().map(Cell::from_raw).collect(),
        );
        let formatted = TableFormatter::default().format_column(&column);
        assert_eq!(
            formatted.cells,
            vec![
                Cell::Text("007".into()),
                Cell::Text("1.0".into()),
                Cell::Text("x".into()),
            ]
        );
    }

    #[test]
    fn test_mixed_column_passes_through_unchanged() {
        let column = Column::new(
            "mixed",
            vec![
                Cell::Text("1".into()),
                Cell::Text("2".into()),
                Cell::Text("x".into()),
            ],
        );
        assert_eq!(TableFormatter::default().format_column(&column), column);
    }

    #[test]
    fn test_numeric_text_is_coerced() {
        let column = Column::new("n", vec![Cell::Text("1.23456".into()), Cell::Missing]);
        let formatted = TableFormatter::new(3).format_column(&column);
        assert_eq!(formatted.cells, vec![Cell::Number(1.235), Cell::Missing]);
    }

    #[test]
    fn test_no_time_column_means_no_datetime() {
        let raw = Table::from_columns(vec![Column::new("open", vec![Cell::Number(1.0)])]).unwrap();
        let formatted = TableFormatter::default().format(&raw);
        assert_eq!(formatted.column_names(), vec!["open"]);
        assert_eq!(formatted.row_count(), 1);
    }

    #[test]
    fn test_existing_datetime_is_replaced_when_time_present() {
        let raw = Table::from_columns(vec![
            Column::new("datetime", vec![Cell::Text("old".into())]),
            Column::new("time", vec![Cell::Number(0.0)]),
        ])
        .unwrap();
        let formatted = TableFormatter::default().format(&raw);
        assert_eq!(formatted.column_names(), vec!["datetime", "time"]);
        assert_eq!(
            formatted.column("datetime").unwrap().cells,
            vec![Cell::Text("1970-01-01 00:00:00".into())]
        );
    }

    #[test]
    fn test_empty_table_keeps_shape() {
        let raw = Table::with_header(&["time", "open"]);
        let formatted = TableFormatter::default().format(&raw);
        assert_eq!(formatted.row_count(), 0);
        assert_eq!(formatted.column_names(), vec!["datetime", "time", "open"]);
    }
}
