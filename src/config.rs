//! Configuration management and validation.
//!
//! A [`ParserConfig`] is fixed when a parser is constructed and applies to
//! every parse that parser performs.

use crate::classifier::CategoryTable;
use crate::constants::{DEFAULT_DECIMAL_PLACES, DEFAULT_MAX_DISPLAY_ROWS, MAX_DECIMAL_PLACES};
use crate::error::{ParserError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Rounding precision for numeric columns
    pub decimal_places: u32,

    /// Rows rendered by data displays
    pub max_display_rows: usize,

    /// Category declarations used to organize columns
    pub categories: CategoryTable,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            max_display_rows: DEFAULT_MAX_DISPLAY_ROWS,
            categories: CategoryTable::default(),
        }
    }
}

impl ParserConfig {
    /// Load a configuration from a JSON file; absent fields keep defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Set the rounding precision
    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Set the number of rows shown by data displays
    pub fn with_max_display_rows(mut self, rows: usize) -> Self {
        self.max_display_rows = rows;
        self
    }

    /// Replace the category table
    pub fn with_categories(mut self, categories: CategoryTable) -> Self {
        self.categories = categories;
        self
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ParserError::configuration(format!(
                "decimal_places must be at most {}, got {}",
                MAX_DECIMAL_PLACES, self.decimal_places
            )));
        }

        let table = &self.categories;
        if table.catch_all_label.is_empty() {
            return Err(ParserError::configuration(
                "catch_all_label must not be empty",
            ));
        }

        let mut seen = HashSet::new();
        for category in &table.categories {
            if category.label.is_empty() {
                return Err(ParserError::configuration("category labels must not be empty"));
            }
            if !seen.insert(category.label.as_str()) {
                return Err(ParserError::configuration(format!(
                    "duplicate category label: {}",
                    category.label
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::CategoryDefinition;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.decimal_places, 4);
        assert_eq!(config.max_display_rows, 10);
        assert_eq!(config.categories, CategoryTable::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ParserConfig::default()
            .with_decimal_places(2)
            .with_max_display_rows(3)
            .with_categories(CategoryTable::new(vec![CategoryDefinition::new(
                "Prices",
                vec!["open"],
            )]));
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.max_display_rows, 3);
        assert_eq!(config.categories.labels(), vec!["Prices"]);
    }

    #[test]
    fn test_validate_rejects_excess_precision() {
        let config = ParserConfig::default().with_decimal_places(16);
        assert!(matches!(
            config.validate(),
            Err(ParserError::Configuration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_labels() {
        let config = ParserConfig::default().with_categories(CategoryTable::new(vec![
            CategoryDefinition::new("A", vec!["x"]),
            CategoryDefinition::new("A", vec!["y"]),
        ]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"decimal_places": 2}}"#).unwrap();

        let config = ParserConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.max_display_rows, 10);
        assert_eq!(config.categories, CategoryTable::default());
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"decimal_places": 99}}"#).unwrap();
        assert!(ParserConfig::from_json_file(file.path()).is_err());
    }
}
