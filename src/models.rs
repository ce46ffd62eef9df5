//! Summary and column-description records produced from formatted tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// First and last derived date-time values, in table order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Missing-cell tally for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingData {
    pub column: String,
    pub count: usize,
    pub percentage: f64,
}

/// Aggregate statistics over a formatted table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_rows: usize,
    pub total_columns: usize,
    pub date_range: Option<DateRange>,
    /// Only columns with at least one missing cell, in table order
    pub missing_data: Vec<MissingData>,
    pub numeric_columns: Vec<String>,
}

impl SummaryStats {
    pub fn missing_for(&self, column: &str) -> Option<&MissingData> {
        self.missing_data.iter().find(|m| m.column == column)
    }
}

/// Inferred column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Numeric with only whole values
    Integer,
    /// Numeric with at least one fractional value
    Float,
    /// Any non-numeric content
    Text,
    /// No values at all
    Empty,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// Descriptive record for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub column_type: ColumnType,
    pub non_missing_count: usize,
    pub missing_count: usize,
    pub unique_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

impl ColumnInfo {
    pub fn is_numeric(&self) -> bool {
        matches!(self.column_type, ColumnType::Integer | ColumnType::Float)
    }
}
