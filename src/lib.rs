//! TradingView CSV Parser Library
//!
//! Parses CSV exports from TradingView carrying LuxAlgo indicator columns
//! and turns them into readable, categorized tables.
//!
//! This library provides tools for:
//! - Reading CSV exports into dynamically typed tables
//! - Converting Unix `time` values into a readable `datetime` column
//! - Rounding numeric columns while preserving missing values
//! - Organizing columns into categories (OHLC, Signals, Bands, ...)
//! - Summary statistics and per-column descriptions
//! - Exporting all data or one category to CSV and JSON
//!
//! ```no_run
//! use tradingview_csv::TradingViewParser;
//!
//! # fn main() -> tradingview_csv::Result<()> {
//! let mut parser = TradingViewParser::default();
//! parser.parse_csv("export.csv")?;
//! println!("{}", parser.display_summary());
//! parser.export_to_json("ohlc.json", Some("OHLC"))?;
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod datetime;
pub mod display;
pub mod error;
pub mod export;
pub mod formatter;
pub mod models;
pub mod parser;
pub mod reader;
pub mod summary;
pub mod table;

// Re-export commonly used types
pub use classifier::{CategoryDefinition, CategoryTable, Classification, ColumnClassifier};
pub use config::ParserConfig;
pub use error::{ParserError, Result};
pub use formatter::TableFormatter;
pub use models::{ColumnInfo, ColumnType, DateRange, MissingData, SummaryStats};
pub use parser::{OrganizedTables, Session, TradingViewParser};
pub use table::{Cell, Column, Table};
