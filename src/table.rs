//! In-memory table model with dynamically typed cells.
//!
//! A [`Table`] is an ordered list of named [`Column`]s of equal length. Cells
//! are a tagged [`Cell`] variant; every coercion in the crate is an explicit
//! function over that variant.

use crate::constants::{MISSING_TEXT, NA_TOKENS};
use crate::error::{ParserError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// A single table value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Finite real number
    Number(f64),
    /// Any value that is neither numeric nor missing
    Text(String),
    /// Absent value
    Missing,
}

impl Cell {
    /// Wrap a raw CSV field. NA tokens become missing; everything else keeps
    /// its source text until a whole column is coerced.
    pub fn from_raw(field: &str) -> Self {
        if NA_TOKENS.contains(&field.trim()) {
            Cell::Missing
        } else {
            Cell::Text(field.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Numeric view of the cell. Text is accepted when it parses losslessly
    /// as a finite real number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Text(text) => parse_finite(text),
            Cell::Missing => None,
        }
    }

    /// Field text written to CSV; missing cells become empty fields
    pub fn to_field(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(value) => write!(f, "{}", value),
            Cell::Text(text) => f.write_str(text),
            Cell::Missing => f.write_str(MISSING_TEXT),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Cell::Number(value) => serializer.serialize_f64(*value),
            Cell::Text(text) => serializer.serialize_str(text),
            Cell::Missing => serializer.serialize_str(MISSING_TEXT),
        }
    }
}

/// Parse trimmed text as a finite f64
fn parse_finite(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Coerce the whole column to numbers, keeping missing cells as `None`.
    ///
    /// Returns `None` when any non-missing cell is not numeric. This is the
    /// single predicate behind both formatting and numeric-column detection.
    pub fn numeric_values(&self) -> Option<Vec<Option<f64>>> {
        self.cells
            .iter()
            .map(|cell| match cell {
                Cell::Missing => Some(None),
                other => other.as_f64().map(Some),
            })
            .collect()
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_values().is_some()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_missing()).count()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Ordered collection of equal-length columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Build a table, checking that all columns have the same length
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|column| column.len() != rows) {
            return Err(ParserError::parse_failure(format!(
                "column '{}' has {} rows, expected {}",
                bad.name,
                bad.len(),
                rows
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Build a table from columns already known to hold `rows` cells each
    pub(crate) fn from_aligned(columns: Vec<Column>, rows: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == rows));
        Self { columns, rows }
    }

    /// Build a table with a header but no data rows
    pub fn with_header<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            columns: names
                .iter()
                .map(|name| Column::new(name.as_ref(), Vec::new()))
                .collect(),
            rows: 0,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Cells of one row, in column order
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        if index >= self.rows {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells[index]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        (0..self.rows).map(move |index| self.columns.iter().map(|c| &c.cells[index]).collect())
    }

    /// Project the named columns, in the given order. Unknown names are skipped.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let columns: Vec<Column> = names
            .iter()
            .filter_map(|name| self.column(name.as_ref()).cloned())
            .collect();
        let rows = if columns.is_empty() { 0 } else { self.rows };
        Self { columns, rows }
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Self {
        let rows = self.rows.min(n);
        Self {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.cells[..rows].to_vec()))
                .collect(),
            rows,
        }
    }
}
