//! Error handling for CSV parsing and export operations.
//!
//! Timestamp conversion and numeric coercion never produce errors; they
//! degrade in place. Everything here is surfaced once to the caller.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("CSV file is empty: {path}")]
    EmptyInput { path: PathBuf },

    #[error("Error parsing CSV file: {message}")]
    ParseFailure { message: String },

    #[error("No data to export. Parse CSV first.")]
    NotYetParsed,

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ParserError {
    /// Wrap any lower-level failure, keeping only its message
    pub fn parse_failure(cause: impl std::fmt::Display) -> Self {
        Self::ParseFailure {
            message: cause.to_string(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParserError>;
