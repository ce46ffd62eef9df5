//! Parser facade holding the raw, formatted and organized tiers.
//!
//! A parser starts empty. A successful parse builds a new [`Session`] with
//! all three tiers and swaps it in as a whole; a failed parse leaves the
//! previous state untouched. Tables are handed out as `Arc` snapshots, so a
//! caller's reference stays valid after a later parse.

use crate::classifier::{Classification, ColumnClassifier};
use crate::config::ParserConfig;
use crate::constants::{DATETIME_COLUMN, NOT_PARSED_MESSAGE, TIME_COLUMN};
use crate::display;
use crate::error::{ParserError, Result};
use crate::export;
use crate::formatter::TableFormatter;
use crate::models::{ColumnInfo, SummaryStats};
use crate::reader::read_table;
use crate::summary;
use crate::table::Table;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tables organized by category, in classification order
#[derive(Debug, Clone, Default)]
pub struct OrganizedTables {
    classification: Classification,
    tables: Vec<(String, Arc<Table>)>,
}

impl OrganizedTables {
    fn build(formatted: &Table, classification: Classification) -> Self {
        let tables = classification
            .iter()
            .map(|group| {
                (
                    group.label.clone(),
                    Arc::new(formatted.select(&group.columns)),
                )
            })
            .collect();
        Self {
            classification,
            tables,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.tables.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn get(&self, label: &str) -> Option<Arc<Table>> {
        self.tables
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, table)| Arc::clone(table))
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables
            .iter()
            .map(|(label, table)| (label.as_str(), table.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// The three tiers produced by one successful parse
#[derive(Debug, Clone)]
pub struct Session {
    pub source: PathBuf,
    pub raw: Arc<Table>,
    pub formatted: Arc<Table>,
    pub organized: Arc<OrganizedTables>,
}

/// Parser for TradingView CSV exports
#[derive(Debug, Clone)]
pub struct TradingViewParser {
    config: ParserConfig,
    formatter: TableFormatter,
    classifier: ColumnClassifier,
    session: Option<Session>,
}

impl Default for TradingViewParser {
    fn default() -> Self {
        Self::from_parts(ParserConfig::default())
    }
}

impl TradingViewParser {
    /// Create a parser after validating its configuration
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    /// Create a parser with default settings and the given precision
    pub fn with_decimal_places(decimal_places: u32) -> Result<Self> {
        Self::new(ParserConfig::default().with_decimal_places(decimal_places))
    }

    fn from_parts(config: ParserConfig) -> Self {
        Self {
            formatter: TableFormatter::new(config.decimal_places),
            classifier: ColumnClassifier::new(config.categories.clone()),
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn is_parsed(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Parse a CSV file and return the formatted table
    pub fn parse_csv(&mut self, path: impl AsRef<Path>) -> Result<Arc<Table>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ParserError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        info!("Parsing CSV file: {}", path.display());
        let file = File::open(path).map_err(ParserError::parse_failure)?;
        self.parse_reader(BufReader::new(file), path)
    }

    /// Parse CSV from any reader; `source` names the input in errors
    pub fn parse_reader<R: Read>(&mut self, reader: R, source: impl AsRef<Path>) -> Result<Arc<Table>> {
        let source = source.as_ref().to_path_buf();
        let session = self.build_session(reader, source)?;
        let formatted = Arc::clone(&session.formatted);
        self.session = Some(session);
        Ok(formatted)
    }

    fn build_session<R: Read>(&self, reader: R, source: PathBuf) -> Result<Session> {
        let raw = read_table(reader)?;
        if raw.is_empty() {
            return Err(ParserError::EmptyInput { path: source });
        }

        let formatted = self.formatter.format(&raw);
        let datetime = raw.has_column(TIME_COLUMN).then_some(DATETIME_COLUMN);
        let classification = self.classifier.classify(&formatted.column_names(), datetime);
        let organized = OrganizedTables::build(&formatted, classification);

        debug!(
            "Parsed {} rows into {} categories: {}",
            formatted.row_count(),
            organized.len(),
            organized.labels().join(", ")
        );

        Ok(Session {
            source,
            raw: Arc::new(raw),
            formatted: Arc::new(formatted),
            organized: Arc::new(organized),
        })
    }

    pub fn raw(&self) -> Option<Arc<Table>> {
        self.session.as_ref().map(|s| Arc::clone(&s.raw))
    }

    pub fn formatted(&self) -> Option<Arc<Table>> {
        self.session.as_ref().map(|s| Arc::clone(&s.formatted))
    }

    pub fn organized(&self) -> Option<Arc<OrganizedTables>> {
        self.session.as_ref().map(|s| Arc::clone(&s.organized))
    }

    /// Category labels present in the parsed data
    pub fn list_categories(&self) -> Option<Vec<String>> {
        self.session.as_ref().map(|s| {
            s.organized
                .labels()
                .into_iter()
                .map(str::to_string)
                .collect()
        })
    }

    pub fn summary(&self) -> Option<SummaryStats> {
        self.session
            .as_ref()
            .map(|s| summary::summarize(&s.formatted))
    }

    pub fn column_info(&self) -> Option<Vec<ColumnInfo>> {
        self.session
            .as_ref()
            .map(|s| summary::column_info(&s.formatted))
    }

    pub fn display_summary(&self) -> String {
        match &self.session {
            Some(session) => display::render_summary(
                &summary::summarize(&session.formatted),
                session.organized.classification(),
            ),
            None => NOT_PARSED_MESSAGE.to_string(),
        }
    }

    /// Render one category, or all data when `category` is `None` or unknown
    pub fn display_data(&self, category: Option<&str>, max_rows: Option<usize>) -> String {
        let Some(session) = &self.session else {
            return NOT_PARSED_MESSAGE.to_string();
        };
        let max_rows = max_rows.unwrap_or(self.config.max_display_rows);

        match category.and_then(|label| session.organized.get(label).map(|t| (label, t))) {
            Some((label, table)) => {
                display::render_data(&format!("{} Data", label), &table, max_rows)
            }
            None => display::render_data("All Data", &session.formatted, max_rows),
        }
    }

    /// Table an export would write: the named category, or everything
    fn export_table(&self, category: Option<&str>) -> Result<Arc<Table>> {
        let session = self.session.as_ref().ok_or(ParserError::NotYetParsed)?;
        match category {
            Some(label) => match session.organized.get(label) {
                Some(table) => Ok(table),
                None => {
                    warn!(
                        "Unknown category '{}', exporting all columns instead",
                        label
                    );
                    Ok(Arc::clone(&session.formatted))
                }
            },
            None => Ok(Arc::clone(&session.formatted)),
        }
    }

    pub fn export_to_csv(&self, path: impl AsRef<Path>, category: Option<&str>) -> Result<()> {
        let table = self.export_table(category)?;
        export::export_csv(&table, path.as_ref())
    }

    pub fn export_to_json(&self, path: impl AsRef<Path>, category: Option<&str>) -> Result<()> {
        let table = self.export_table(category)?;
        export::export_json(&table, path.as_ref())
    }

    pub fn write_csv<W: Write>(&self, writer: W, category: Option<&str>) -> Result<()> {
        let table = self.export_table(category)?;
        export::write_csv(&table, writer)
    }

    pub fn write_json<W: Write>(&self, writer: W, category: Option<&str>) -> Result<()> {
        let table = self.export_table(category)?;
        export::write_json(&table, writer)
    }
}
